//! Admin settings DTOs - the API key never leaves the server in full

use serde::{Deserialize, Serialize};

use crate::application::services::UpdateSettingsRequest;
use crate::domain::value_objects::GenerationSettings;

const KEY_PREVIEW_CHARS: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub api_key_configured: bool,
    /// First characters of the key followed by an ellipsis
    pub api_key_preview: Option<String>,
    pub prompt_id: String,
    pub prompt_version_id: String,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub fallback_enabled: bool,
}

impl From<&GenerationSettings> for SettingsResponse {
    fn from(settings: &GenerationSettings) -> Self {
        let key = settings.credential();
        Self {
            api_key_configured: key.is_some(),
            api_key_preview: key.map(|key| {
                let preview: String = key.chars().take(KEY_PREVIEW_CHARS).collect();
                format!("{}…", preview)
            }),
            prompt_id: settings.prompt_id.clone(),
            prompt_version_id: settings.prompt_version_id.clone(),
            max_attempts: settings.max_attempts,
            initial_backoff_ms: settings.initial_backoff_ms,
            request_timeout_secs: settings.request_timeout_secs,
            fallback_enabled: settings.fallback_enabled,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSettingsRequestDto {
    pub api_key: Option<String>,
    pub prompt_id: Option<String>,
    pub prompt_version_id: Option<String>,
    pub max_attempts: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub fallback_enabled: Option<bool>,
}

impl From<UpdateSettingsRequestDto> for UpdateSettingsRequest {
    fn from(dto: UpdateSettingsRequestDto) -> Self {
        Self {
            api_key: dto.api_key,
            prompt_id: dto.prompt_id,
            prompt_version_id: dto.prompt_version_id,
            max_attempts: dto.max_attempts,
            initial_backoff_ms: dto.initial_backoff_ms,
            request_timeout_secs: dto.request_timeout_secs,
            fallback_enabled: dto.fallback_enabled,
        }
    }
}
