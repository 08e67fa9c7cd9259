use async_trait::async_trait;
use serde_json::{json, Value};

use super::upstream::{OpenAiChatClient, UpstreamError};

pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a coatings technical assistant for marine environments. Answer in English only. \
Be concise, give numbered procedures where useful, and reference PPG generic product families mentioned in context without inventing specs. \
Mention ISO 8501/12944 at a high level if relevant.";

const ASSISTANT_TEMPERATURE: f32 = 0.2;

/// Follow-up Q&A over a previous inspection report.
#[async_trait]
pub trait InspectionAssistant: Send + Sync {
    async fn answer(&self, question: &str, context: &Value) -> Result<String, UpstreamError>;
}

/// Context document handed to the assistant; both parts are passed through verbatim.
pub fn assistant_context(meta: &Value, last_result: &Value) -> Value {
    json!({ "meta": meta, "lastResult": last_result })
}

#[async_trait]
impl InspectionAssistant for OpenAiChatClient {
    async fn answer(&self, question: &str, context: &Value) -> Result<String, UpstreamError> {
        let messages = vec![
            json!({ "role": "system", "content": ASSISTANT_SYSTEM_PROMPT }),
            json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": format!("Context (JSON): {context}") },
                    { "type": "text", "text": format!("User question: {question}") },
                ],
            }),
        ];

        self.complete(messages, ASSISTANT_TEMPERATURE, None).await
    }
}
