//! Prompt-run port - Interface to the remote message generation service

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::value_objects::ReplacementMap;

/// Payload of a single prompt run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptRunRequest {
    pub prompt_id: String,
    pub prompt_version_id: String,
    pub replacements: ReplacementMap,
}

/// Failure of a single prompt-run attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptRunError {
    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Connection, DNS or TLS failure
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// Body was not JSON or carried no recognized message field
    #[error("Unparseable response: {0}")]
    Unparseable(String),
}

/// 5xx responses are retried; every other non-success status is a rejection
pub fn is_server_error(status: u16) -> bool {
    (500..600).contains(&status)
}

/// Port for executing a stored prompt with replacement values
#[async_trait]
pub trait PromptRunPort: Send + Sync {
    /// Run the prompt once and return the generated text
    async fn run(&self, request: &PromptRunRequest, api_key: &str) -> Result<String, PromptRunError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_5xx_is_a_server_error() {
        assert!(is_server_error(500));
        assert!(is_server_error(503));
        assert!(!is_server_error(401));
        assert!(!is_server_error(404));
        assert!(!is_server_error(422));
        assert!(!is_server_error(200));
    }
}
