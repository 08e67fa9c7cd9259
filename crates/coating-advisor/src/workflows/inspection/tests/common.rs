use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::inspection::{
    ClassificationContext, DefectClassifier, ImageRef, InspectionAssistant, InspectionMeta,
    InspectionService, UpstreamError,
};

/// Returns canned classifier text and records every call.
#[derive(Default)]
pub(super) struct ScriptedClassifier {
    response: String,
    calls: Mutex<Vec<(usize, ClassificationContext)>>,
}

impl ScriptedClassifier {
    pub(super) fn returning(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<(usize, ClassificationContext)> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl DefectClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        images: &[ImageRef],
        context: &ClassificationContext,
    ) -> Result<String, UpstreamError> {
        self.calls
            .lock()
            .expect("lock")
            .push((images.len(), context.clone()));
        Ok(self.response.clone())
    }
}

pub(super) struct FailingClassifier;

#[async_trait]
impl DefectClassifier for FailingClassifier {
    async fn classify(
        &self,
        _images: &[ImageRef],
        _context: &ClassificationContext,
    ) -> Result<String, UpstreamError> {
        Err(UpstreamError::Status {
            status: 503,
            body: "model overloaded".to_string(),
        })
    }
}

#[derive(Default)]
pub(super) struct CannedAssistant {
    questions: Mutex<Vec<(String, Value)>>,
}

impl CannedAssistant {
    pub(super) fn questions(&self) -> Vec<(String, Value)> {
        self.questions.lock().expect("lock").clone()
    }
}

#[async_trait]
impl InspectionAssistant for CannedAssistant {
    async fn answer(&self, question: &str, context: &Value) -> Result<String, UpstreamError> {
        self.questions
            .lock()
            .expect("lock")
            .push((question.to_string(), context.clone()));
        Ok(format!("1. Re-check DFT before answering: {question}"))
    }
}

pub(super) struct UnconfiguredAssistant;

#[async_trait]
impl InspectionAssistant for UnconfiguredAssistant {
    async fn answer(&self, _question: &str, _context: &Value) -> Result<String, UpstreamError> {
        Err(UpstreamError::NotConfigured)
    }
}

pub(super) const TWO_DEFECTS: &str = r#"{"items":[
    {"defect":{"type":"pitting","severity":"severe","confidence":0.82,"notes":"pits along weld seam"}},
    {"defect":{"type":"mechanical_damage","severity":"minor","confidence":0.6,"notes":"fender scrape"}}
]}"#;

pub(super) fn build_service<C, A>(
    classifier: C,
    assistant: A,
) -> (Arc<C>, Arc<A>, InspectionService<C, A>)
where
    C: DefectClassifier + 'static,
    A: InspectionAssistant + 'static,
{
    let classifier = Arc::new(classifier);
    let assistant = Arc::new(assistant);
    let service = InspectionService::new(classifier.clone(), assistant.clone());
    (classifier, assistant, service)
}

pub(super) fn images(count: usize) -> Vec<ImageRef> {
    (0..count)
        .map(|index| ImageRef(format!("data:image/jpeg;base64,SU1H{index}")))
        .collect()
}

pub(super) fn meta(area: &str, location: Option<&str>, environment: Option<&str>) -> InspectionMeta {
    InspectionMeta {
        area: area.to_string(),
        location: location.map(str::to_string),
        environment: environment.map(str::to_string),
        ..InspectionMeta::default()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json body")
}
