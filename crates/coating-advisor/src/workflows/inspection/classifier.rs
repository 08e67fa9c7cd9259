use async_trait::async_trait;
use serde_json::{json, Value};

use super::domain::{EnvironmentCategory, ImageRef, InspectionMeta};
use super::upstream::{OpenAiChatClient, UpstreamError};

pub const CLASSIFIER_SYSTEM_PROMPT: &str = "You are a coatings inspector assistant. Return ONLY valid JSON.
For each image, infer: defect { type: one of [general_corrosion, pitting, blistering, delamination, mechanical_damage, fouling],
severity: [minor, moderate, severe], confidence: 0..1, notes: short explanation }.
If unsure, type=general_corrosion, severity=moderate.";

const CLASSIFIER_TEMPERATURE: f32 = 0.0;
const CLASSIFIER_MAX_TOKENS: u32 = 700;

/// Inspection metadata forwarded to the classifier alongside the photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationContext {
    pub area: String,
    pub environment: EnvironmentCategory,
    pub substrate: Option<String>,
    pub existing_system: Option<String>,
}

impl ClassificationContext {
    pub fn from_meta(meta: &InspectionMeta, environment: EnvironmentCategory) -> Self {
        Self {
            area: meta.area.clone(),
            environment,
            substrate: meta.substrate.clone(),
            existing_system: meta.existing_system.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "Analyze the images for corrosion or coating breakdown. Metadata: area={}, env={}, substrate={}, existing={}. \
             Return compact JSON with items[].defect{{type,severity,confidence,notes}}, one entry per image in the order given.",
            or_unknown(&self.area),
            self.environment,
            or_unknown(self.substrate.as_deref().unwrap_or_default()),
            or_unknown(self.existing_system.as_deref().unwrap_or_default()),
        )
    }
}

fn or_unknown(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "unknown"
    } else {
        trimmed
    }
}

/// Visual classification oracle. Returns raw model text; callers must treat it as untrusted.
#[async_trait]
pub trait DefectClassifier: Send + Sync {
    async fn classify(
        &self,
        images: &[ImageRef],
        context: &ClassificationContext,
    ) -> Result<String, UpstreamError>;
}

#[async_trait]
impl DefectClassifier for OpenAiChatClient {
    async fn classify(
        &self,
        images: &[ImageRef],
        context: &ClassificationContext,
    ) -> Result<String, UpstreamError> {
        let mut content = vec![json!({ "type": "text", "text": context.prompt() })];
        content.extend(images.iter().map(|image| {
            json!({ "type": "image_url", "image_url": { "url": image.0.as_str() } })
        }));

        let messages: Vec<Value> = vec![
            json!({ "role": "system", "content": CLASSIFIER_SYSTEM_PROMPT }),
            json!({ "role": "user", "content": content }),
        ];

        let text = self
            .complete(messages, CLASSIFIER_TEMPERATURE, Some(CLASSIFIER_MAX_TOKENS))
            .await?;

        if text.is_empty() {
            Ok("{}".to_string())
        } else {
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_metadata_and_effective_environment() {
        let context = ClassificationContext {
            area: "Ballast Tank".to_string(),
            environment: EnvironmentCategory::C5M,
            substrate: Some("Steel".to_string()),
            existing_system: None,
        };

        let prompt = context.prompt();
        assert!(prompt.contains("area=Ballast Tank"));
        assert!(prompt.contains("env=C5M"));
        assert!(prompt.contains("substrate=Steel"));
        assert!(prompt.contains("existing=unknown"));
        assert!(prompt.contains("items[].defect{type,severity,confidence,notes}"));
    }
}
