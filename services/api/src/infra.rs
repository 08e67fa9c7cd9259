use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use coating_advisor::error::AppError;
use coating_advisor::workflows::inspection::{
    ClassificationContext, DefectClassifier, DefectType, EnvironmentCategory, ImageRef,
    InspectionAssistant, InspectionError, UpstreamError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Offline classifier used by `demo`: replays a fixed payload regardless of the photos.
pub(crate) struct ScriptedClassifier {
    payload: String,
}

impl ScriptedClassifier {
    pub(crate) fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl DefectClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        _images: &[ImageRef],
        _context: &ClassificationContext,
    ) -> Result<String, UpstreamError> {
        Ok(self.payload.clone())
    }
}

/// Offline assistant used by `demo`.
pub(crate) struct ScriptedAssistant;

#[async_trait]
impl InspectionAssistant for ScriptedAssistant {
    async fn answer(&self, question: &str, context: &Value) -> Result<String, UpstreamError> {
        let items = context["lastResult"]["items"]
            .as_array()
            .map(Vec::len)
            .unwrap_or_default();
        Ok(format!(
            "(offline) {question} -> check the TDS overcoating table for each of the {items} recommended cycles"
        ))
    }
}

/// Read a photo from disk and encode it as a `data:` URL for the classifier.
pub(crate) fn image_data_url(path: &Path) -> Result<ImageRef, AppError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(InspectionError::InvalidInput(format!(
            "{} is not an image ({mime})",
            path.display()
        ))
        .into());
    }

    let bytes = std::fs::read(path)?;
    Ok(ImageRef(format!(
        "data:{mime};base64,{}",
        STANDARD.encode(bytes)
    )))
}

pub(crate) fn parse_defect(raw: &str) -> Result<DefectType, String> {
    DefectType::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = DefectType::ALL.iter().map(|defect| defect.label()).collect();
        format!("unknown defect '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn parse_environment(raw: &str) -> Result<EnvironmentCategory, String> {
    raw.parse::<EnvironmentCategory>()
        .map_err(|err| err.to_string())
}
