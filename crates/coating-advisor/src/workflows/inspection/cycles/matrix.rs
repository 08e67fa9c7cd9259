use std::io::Write;

use serde::Serialize;

use super::super::domain::{DefectType, EnvironmentCategory};
use super::select_cycle;
use super::table::{AreaFamily, RECOGNIZED_AREAS};

/// Flattened view of one decision-table cell, for audits and CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRow {
    pub area: &'static str,
    pub family: &'static str,
    pub defect: &'static str,
    pub environment: &'static str,
    pub surface_prep: String,
    pub products: String,
    pub alternatives: usize,
}

/// Every recognized area crossed with every defect type and environment.
pub fn decision_matrix() -> Vec<DecisionRow> {
    let mut rows = Vec::with_capacity(
        RECOGNIZED_AREAS.len() * DefectType::ALL.len() * EnvironmentCategory::ALL.len(),
    );

    for area in RECOGNIZED_AREAS {
        let family = AreaFamily::classify(area);
        for defect in DefectType::ALL {
            for env in EnvironmentCategory::ALL {
                let cycle = select_cycle(area, defect, env);
                let products = cycle
                    .products
                    .iter()
                    .map(|product| format!("{} [{}]", product.name, product.dft))
                    .collect::<Vec<_>>()
                    .join(" > ");

                rows.push(DecisionRow {
                    area,
                    family: family.label(),
                    defect: defect.label(),
                    environment: env.label(),
                    surface_prep: cycle.surface_prep,
                    products,
                    alternatives: cycle.alternatives.len(),
                });
            }
        }
    }

    rows
}

pub fn write_matrix_csv<W: Write>(writer: W) -> Result<usize, csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let rows = decision_matrix();
    for row in &rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}
