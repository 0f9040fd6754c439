use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::application::ports::outbound::{
    GenerationSettingsPort, SettingsError, SettingsRepositoryPort,
};
use crate::domain::value_objects::GenerationSettings;

/// Partial update from the admin screen
///
/// `api_key`: `None` keeps the stored key, `Some("")` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsRequest {
    pub api_key: Option<String>,
    pub prompt_id: Option<String>,
    pub prompt_version_id: Option<String>,
    pub max_attempts: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub fallback_enabled: Option<bool>,
}

impl UpdateSettingsRequest {
    fn apply_to(self, mut settings: GenerationSettings) -> GenerationSettings {
        if let Some(api_key) = self.api_key {
            let api_key = api_key.trim().to_string();
            settings.api_key = (!api_key.is_empty()).then_some(api_key);
        }
        if let Some(prompt_id) = self.prompt_id {
            settings.prompt_id = prompt_id.trim().to_string();
        }
        if let Some(prompt_version_id) = self.prompt_version_id {
            settings.prompt_version_id = prompt_version_id.trim().to_string();
        }
        if let Some(max_attempts) = self.max_attempts {
            settings.max_attempts = max_attempts;
        }
        if let Some(initial_backoff_ms) = self.initial_backoff_ms {
            settings.initial_backoff_ms = initial_backoff_ms;
        }
        if let Some(request_timeout_secs) = self.request_timeout_secs {
            settings.request_timeout_secs = request_timeout_secs;
        }
        if let Some(fallback_enabled) = self.fallback_enabled {
            settings.fallback_enabled = fallback_enabled;
        }
        settings
    }
}

pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryPort>,
    defaults: GenerationSettings,
    cache: RwLock<Option<GenerationSettings>>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryPort>, defaults: GenerationSettings) -> Self {
        Self {
            repository,
            defaults,
            cache: RwLock::new(None),
        }
    }

    /// Get current settings (cached)
    pub async fn get(&self) -> GenerationSettings {
        let cache = self.cache.read().await;
        if let Some(settings) = &*cache {
            return settings.clone();
        }
        drop(cache);

        // Load from DB
        match self.repository.get().await {
            Ok(settings) => {
                *self.cache.write().await = Some(settings.clone());
                settings
            }
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                self.defaults.clone()
            }
        }
    }

    /// Apply a partial update, validate, persist and refresh the cache
    pub async fn update(
        &self,
        request: UpdateSettingsRequest,
    ) -> Result<GenerationSettings, SettingsError> {
        let settings = request.apply_to(self.get().await);
        settings.validate().map_err(SettingsError::Invalid)?;

        self.repository.save(&settings).await?;
        *self.cache.write().await = Some(settings.clone());
        info!(
            api_key_configured = settings.credential().is_some(),
            max_attempts = settings.max_attempts,
            fallback_enabled = settings.fallback_enabled,
            "Generation settings updated"
        );
        Ok(settings)
    }

    /// Reset to configured defaults and clear DB values
    pub async fn reset(&self) -> Result<GenerationSettings, SettingsError> {
        let settings = self.repository.reset().await?;
        *self.cache.write().await = Some(settings.clone());
        Ok(settings)
    }
}

#[async_trait]
impl GenerationSettingsPort for SettingsService {
    async fn generation_settings(&self) -> GenerationSettings {
        self.get().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// In-memory repository that counts loads
    struct MemoryRepository {
        defaults: GenerationSettings,
        stored: Mutex<Option<GenerationSettings>>,
        loads: Mutex<u32>,
    }

    impl MemoryRepository {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                defaults: GenerationSettings::default(),
                stored: Mutex::new(None),
                loads: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl SettingsRepositoryPort for MemoryRepository {
        async fn get(&self) -> Result<GenerationSettings, SettingsError> {
            *self.loads.lock().unwrap() += 1;
            Ok(self
                .stored
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| self.defaults.clone()))
        }

        async fn save(&self, settings: &GenerationSettings) -> Result<(), SettingsError> {
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }

        async fn reset(&self) -> Result<GenerationSettings, SettingsError> {
            *self.stored.lock().unwrap() = None;
            Ok(self.defaults.clone())
        }
    }

    #[tokio::test]
    async fn test_get_is_cached() {
        let repository = MemoryRepository::new();
        let service = SettingsService::new(repository.clone(), GenerationSettings::default());

        service.get().await;
        service.get().await;

        assert_eq!(*repository.loads.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_key_when_absent_and_clears_when_blank() {
        let repository = MemoryRepository::new();
        let service = SettingsService::new(repository.clone(), GenerationSettings::default());

        let settings = service
            .update(UpdateSettingsRequest {
                api_key: Some("hl-secret".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(settings.credential(), Some("hl-secret"));

        let settings = service
            .update(UpdateSettingsRequest {
                max_attempts: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(settings.credential(), Some("hl-secret"));
        assert_eq!(settings.max_attempts, 5);

        let settings = service
            .update(UpdateSettingsRequest {
                api_key: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(settings.api_key, None);
        assert_eq!(repository.stored.lock().unwrap().as_ref().unwrap().api_key, None);
    }

    #[tokio::test]
    async fn test_invalid_update_is_rejected_and_not_saved() {
        let repository = MemoryRepository::new();
        let service = SettingsService::new(repository.clone(), GenerationSettings::default());

        let result = service
            .update(UpdateSettingsRequest {
                max_attempts: Some(0),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(SettingsError::Invalid(_))));
        assert!(repository.stored.lock().unwrap().is_none());
        assert_eq!(service.get().await.max_attempts, 3);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let repository = MemoryRepository::new();
        let service = SettingsService::new(repository.clone(), GenerationSettings::default());

        service
            .update(UpdateSettingsRequest {
                fallback_enabled: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        let settings = service.reset().await.unwrap();

        assert!(settings.fallback_enabled);
        assert!(service.generation_settings().await.fallback_enabled);
    }
}
