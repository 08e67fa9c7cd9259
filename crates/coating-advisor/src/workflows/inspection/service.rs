use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use super::assistant::{assistant_context, InspectionAssistant};
use super::classifier::{ClassificationContext, DefectClassifier};
use super::domain::{
    EnvironmentCategory, FollowUpAnswer, FollowUpRequest, ImageRef, InspectionMeta,
    InspectionReport, ReportMeta, DISCLAIMER,
};
use super::environment::estimate_environment;
use super::reconcile::reconcile;
use super::upstream::UpstreamError;

/// Facade tying the environment estimate, the classifier and the decision table together.
pub struct InspectionService<C, A> {
    classifier: Arc<C>,
    assistant: Arc<A>,
}

impl<C, A> InspectionService<C, A>
where
    C: DefectClassifier + 'static,
    A: InspectionAssistant + 'static,
{
    pub fn new(classifier: Arc<C>, assistant: Arc<A>) -> Self {
        Self {
            classifier,
            assistant,
        }
    }

    /// Classify the photos and attach a repair cycle to each, one item per image.
    pub async fn run(
        &self,
        images: &[ImageRef],
        meta: InspectionMeta,
    ) -> Result<InspectionReport, InspectionError> {
        if images.is_empty() {
            return Err(InspectionError::InvalidInput(
                "at least one image is required".to_string(),
            ));
        }

        let estimated_env = estimate_environment(meta.location.as_deref().unwrap_or_default());
        let effective_env = effective_environment(&meta, estimated_env)?;
        info!(
            area = %meta.area,
            images = images.len(),
            %estimated_env,
            %effective_env,
            "running inspection"
        );

        let context = ClassificationContext::from_meta(&meta, effective_env);
        let raw = self
            .classifier
            .classify(images, &context)
            .await
            .inspect_err(|err| error!(error = %err, "defect classifier unavailable"))?;

        let items = reconcile(&raw, images.len(), effective_env, &meta.area);

        Ok(InspectionReport {
            meta: ReportMeta::new(meta, estimated_env, effective_env),
            items,
            disclaimer: DISCLAIMER,
            generated_at: Utc::now(),
        })
    }

    /// Forward a follow-up question with the caller's metadata and last report as context.
    pub async fn ask(&self, request: FollowUpRequest) -> Result<FollowUpAnswer, InspectionError> {
        let question = request
            .question
            .as_deref()
            .map(str::trim)
            .filter(|question| !question.is_empty())
            .ok_or_else(|| InspectionError::InvalidInput("missing question".to_string()))?;

        let context = assistant_context(&request.meta, &request.last_result);
        let answer = self
            .assistant
            .answer(question, &context)
            .await
            .inspect_err(|err| error!(error = %err, "inspection assistant unavailable"))?;

        Ok(FollowUpAnswer { answer })
    }
}

/// An explicit override always wins over the location estimate; `Auto` or blank defers to it.
pub fn effective_environment(
    meta: &InspectionMeta,
    estimated: EnvironmentCategory,
) -> Result<EnvironmentCategory, InspectionError> {
    match meta.environment_override() {
        Some(value) => value
            .parse::<EnvironmentCategory>()
            .map_err(|err| InspectionError::InvalidInput(err.to_string())),
        None => Ok(estimated),
    }
}

/// Error raised by the inspection service.
#[derive(Debug, thiserror::Error)]
pub enum InspectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
