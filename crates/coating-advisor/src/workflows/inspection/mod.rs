//! Marine coating inspection: corrosivity estimate, cycle selection and reconciliation of
//! classifier output into per-image repair recommendations.

pub mod assistant;
pub mod classifier;
pub mod cycles;
pub mod domain;
pub mod environment;
pub mod reconcile;
pub mod router;
pub mod service;
pub mod upstream;

#[cfg(test)]
mod tests;

pub use assistant::{assistant_context, InspectionAssistant};
pub use classifier::{ClassificationContext, DefectClassifier};
pub use cycles::{
    decision_matrix, select_cycle, write_matrix_csv, AreaFamily, DecisionRow, RECOGNIZED_AREAS,
};
pub use domain::{
    AlternativeCycle, CoatingCycle, Coordinates, Defect, DefectSource, DefectType,
    EnvironmentCategory, FollowUpAnswer, FollowUpRequest, ImageRef, InspectionMeta,
    InspectionReport, InspectionRequest, Item, ProductRef, ReportMeta, Severity,
    UnknownEnvironment, AUTO_ENVIRONMENT, DISCLAIMER,
};
pub use environment::{estimate_environment, BASELINE_ENVIRONMENT};
pub use reconcile::reconcile;
pub use router::inspection_router;
pub use service::{effective_environment, InspectionError, InspectionService};
pub use upstream::{OpenAiChatClient, UpstreamError};
