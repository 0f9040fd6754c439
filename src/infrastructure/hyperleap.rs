//! Hyperleap client for prompt-run message generation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::application::ports::outbound::{PromptRunError, PromptRunPort, PromptRunRequest};

const API_KEY_HEADER: &str = "x-hl-api-key";

/// Top-level fields that may carry the generated text, in priority order
pub const RESPONSE_FIELDS: [&str; 7] = [
    "output",
    "result",
    "message",
    "text",
    "content",
    "response",
    "generated_text",
];

/// Client for the Hyperleap prompt-run API
pub struct HyperleapClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HyperleapClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("campaign-console-engine/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn map_transport_error(&self, error: reqwest::Error) -> PromptRunError {
        if error.is_timeout() {
            PromptRunError::Timeout(self.timeout)
        } else {
            PromptRunError::Transport(error.to_string())
        }
    }
}

/// First present, non-blank message in a prompt-run response body.
///
/// Checks `RESPONSE_FIELDS` in order, then the chat-completion shape
/// `choices[0].message.content`.
pub fn extract_message(body: &Value) -> Option<String> {
    let non_blank = |value: &Value| {
        value
            .as_str()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    RESPONSE_FIELDS
        .iter()
        .find_map(|field| body.get(field).and_then(non_blank))
        .or_else(|| body.pointer("/choices/0/message/content").and_then(non_blank))
}

#[async_trait]
impl PromptRunPort for HyperleapClient {
    async fn run(&self, request: &PromptRunRequest, api_key: &str) -> Result<String, PromptRunError> {
        let response = self
            .client
            .post(format!("{}/prompt-runs", self.base_url))
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Prompt-run response received");

        if !status.is_success() {
            return Err(PromptRunError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| PromptRunError::Unparseable(format!("invalid JSON: {}", e)))?;

        extract_message(&json).ok_or_else(|| {
            let fields = json
                .as_object()
                .map(|object| object.keys().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            PromptRunError::Unparseable(format!("no message field (fields: {})", fields))
        })
    }
}
