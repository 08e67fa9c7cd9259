use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::config::ClassifierConfig;

/// Failure talking to the hosted model.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("model API key is not configured")]
    NotConfigured,
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model response envelope malformed: {0}")]
    MalformedEnvelope(String),
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiChatClient {
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat request and return the first choice's text, trimmed. Missing content
    /// comes back as an empty string.
    pub(crate) async fn complete(
        &self,
        messages: Vec<Value>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::NotConfigured)?;

        let mut body = json!({
            "model": self.model,
            "temperature": temperature,
            "messages": messages,
        });
        if let Some(limit) = max_tokens {
            body["max_tokens"] = json!(limit);
        }

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(%url, model = %self.model, "sending chat completion request");

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = response.json().await?;
        extract_content(&envelope)
    }
}

fn extract_content(envelope: &Value) -> Result<String, UpstreamError> {
    let first = envelope
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| UpstreamError::MalformedEnvelope("no choices returned".to_string()))?;

    Ok(first
        .pointer("/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string())
}
