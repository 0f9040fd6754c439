//! Application configuration
//!
//! Precedence: built-in defaults < TOML file (`CAMPAIGN_CONFIG`, default
//! `config/campaign-console.toml`) < `CAMPAIGN__*` environment variables.
//! The prompt-run API key is read from `HYPERLEAP_API_KEY`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::value_objects::GenerationSettings;

/// Application configuration loaded at startup
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection URL
    pub database_url: String,

    /// Prompt-run service base URL
    pub hyperleap_base_url: String,
    #[serde(default)]
    pub hyperleap_api_key: Option<String>,
    pub prompt_id: String,
    pub prompt_version_id: String,

    // Generation defaults, overridable from the admin settings
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub fallback_enabled: bool,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load() -> Result<Self> {
        let defaults = GenerationSettings::default();
        let config_path = std::env::var("CAMPAIGN_CONFIG")
            .unwrap_or_else(|_| "config/campaign-console.toml".to_string());

        let builder = config::Config::builder()
            .set_default("server_port", 3000_i64)?
            .set_default("database_url", "sqlite://campaign-console.db")?
            .set_default("hyperleap_base_url", "https://api.hyperleapai.com")?
            .set_default("prompt_id", defaults.prompt_id.clone())?
            .set_default("prompt_version_id", defaults.prompt_version_id.clone())?
            .set_default("max_attempts", i64::from(defaults.max_attempts))?
            .set_default("initial_backoff_ms", defaults.initial_backoff_ms as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("fallback_enabled", defaults.fallback_enabled)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let config: Self = builder
            .add_source(config::Environment::with_prefix("CAMPAIGN").separator("__"))
            .set_override_option("hyperleap_api_key", std::env::var("HYPERLEAP_API_KEY").ok())?
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config
            .generation_defaults()
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid generation settings in configuration")?;

        Ok(config)
    }

    /// Generation settings before any admin override
    pub fn generation_defaults(&self) -> GenerationSettings {
        GenerationSettings {
            api_key: self.hyperleap_api_key.clone(),
            prompt_id: self.prompt_id.clone(),
            prompt_version_id: self.prompt_version_id.clone(),
            max_attempts: self.max_attempts,
            initial_backoff_ms: self.initial_backoff_ms,
            request_timeout_secs: self.request_timeout_secs,
            fallback_enabled: self.fallback_enabled,
        }
    }
}
