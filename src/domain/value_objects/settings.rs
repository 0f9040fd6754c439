//! Message generation settings value object
//!
//! # Architectural Note (Settings Serialization)
//!
//! GenerationSettings includes serde derives because:
//! 1. Settings are stored in SQLite as key-value pairs
//! 2. Settings are edited from the admin screen via the REST API
//!
//! The API key is the one field never echoed back; see the settings DTOs.

use serde::{Deserialize, Serialize};

pub const MAX_ATTEMPTS_LIMIT: u32 = 10;
pub const REQUEST_TIMEOUT_LIMIT_SECS: u64 = 120;
pub const MAX_BACKOFF_MS: u64 = 30_000;

/// Everything the generation pipeline reads at request time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Credential for the prompt-run service
    pub api_key: Option<String>,
    pub prompt_id: String,
    pub prompt_version_id: String,

    // Retry
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub request_timeout_secs: u64,

    /// Synthesize messages locally when the remote service is unusable
    pub fallback_enabled: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            prompt_id: "9ab5aa1f-b408-4881-9355-d82bf23c52dd".to_string(),
            prompt_version_id: "7c3a9c75-150e-4d92-99de-af31ff065bb9".to_string(),
            max_attempts: 3,
            initial_backoff_ms: 1000,
            request_timeout_secs: 30,
            fallback_enabled: true,
        }
    }
}

impl GenerationSettings {
    /// The API key, if one is configured and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_ATTEMPTS_LIMIT).contains(&self.max_attempts) {
            return Err(format!(
                "max_attempts must be between 1 and {}",
                MAX_ATTEMPTS_LIMIT
            ));
        }
        if self.initial_backoff_ms > MAX_BACKOFF_MS {
            return Err(format!(
                "initial_backoff_ms must be at most {}",
                MAX_BACKOFF_MS
            ));
        }
        if !(1..=REQUEST_TIMEOUT_LIMIT_SECS).contains(&self.request_timeout_secs) {
            return Err(format!(
                "request_timeout_secs must be between 1 and {}",
                REQUEST_TIMEOUT_LIMIT_SECS
            ));
        }
        if self.prompt_id.trim().is_empty() || self.prompt_version_id.trim().is_empty() {
            return Err("prompt_id and prompt_version_id cannot be empty".to_string());
        }
        Ok(())
    }
}
