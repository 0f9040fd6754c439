use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{SettingsError, SettingsRepositoryPort};
use crate::domain::value_objects::GenerationSettings;

pub struct SqliteSettingsRepository {
    pool: SqlitePool,
    /// Values from configuration; DB rows override them
    defaults: GenerationSettings,
}

impl SqliteSettingsRepository {
    pub async fn new(pool: SqlitePool, defaults: GenerationSettings) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#).execute(&pool).await?;

        Ok(Self { pool, defaults })
    }
}

#[async_trait]
impl SettingsRepositoryPort for SqliteSettingsRepository {
    async fn get(&self) -> Result<GenerationSettings, SettingsError> {
        let mut settings = self.defaults.clone();

        // Override with DB values
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SettingsError::Database(e.to_string()))?;

        for (key, value) in rows {
            match key.as_str() {
                "api_key" => settings.api_key = (!value.is_empty()).then_some(value),
                "prompt_id" => settings.prompt_id = value,
                "prompt_version_id" => settings.prompt_version_id = value,
                "max_attempts" => if let Ok(v) = value.parse() { settings.max_attempts = v; },
                "initial_backoff_ms" => if let Ok(v) = value.parse() { settings.initial_backoff_ms = v; },
                "request_timeout_secs" => if let Ok(v) = value.parse() { settings.request_timeout_secs = v; },
                "fallback_enabled" => if let Ok(v) = value.parse() { settings.fallback_enabled = v; },
                _ => {}
            }
        }

        Ok(settings)
    }

    async fn save(&self, settings: &GenerationSettings) -> Result<(), SettingsError> {
        let pairs = [
            ("api_key", settings.api_key.clone().unwrap_or_default()),
            ("prompt_id", settings.prompt_id.clone()),
            ("prompt_version_id", settings.prompt_version_id.clone()),
            ("max_attempts", settings.max_attempts.to_string()),
            ("initial_backoff_ms", settings.initial_backoff_ms.to_string()),
            ("request_timeout_secs", settings.request_timeout_secs.to_string()),
            ("fallback_enabled", settings.fallback_enabled.to_string()),
        ];

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SettingsError::Database(e.to_string()))?;

        for (key, value) in pairs {
            sqlx::query("INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)")
                .bind(key)
                .bind(value)
                .execute(&mut *tx)
                .await
                .map_err(|e| SettingsError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| SettingsError::Database(e.to_string()))
    }

    async fn reset(&self) -> Result<GenerationSettings, SettingsError> {
        sqlx::query("DELETE FROM settings")
            .execute(&self.pool)
            .await
            .map_err(|e| SettingsError::Database(e.to_string()))?;

        Ok(self.defaults.clone())
    }
}
