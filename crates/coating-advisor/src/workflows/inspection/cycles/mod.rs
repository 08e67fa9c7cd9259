//! Coating-cycle decision table: area family × defect type × corrosivity.

pub mod catalog;
mod matrix;
mod routing;
mod table;

pub use matrix::{decision_matrix, write_matrix_csv, DecisionRow};
pub use table::{AreaFamily, RECOGNIZED_AREAS};

use super::domain::{CoatingCycle, DefectType, EnvironmentCategory};

/// Select the repair cycle for an area, defect and environment.
///
/// Total over its inputs: unrecognized areas resolve to the generic family and every route
/// yields a non-empty product list.
pub fn select_cycle(area: &str, defect: DefectType, env: EnvironmentCategory) -> CoatingCycle {
    let family = AreaFamily::classify(area);
    routing::route(family.profile(), defect, env)
}
