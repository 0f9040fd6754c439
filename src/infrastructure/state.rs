//! Shared application state

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;

use crate::application::ports::outbound::{
    CampaignRepositoryPort, PromptRunPort, SettingsRepositoryPort,
};
use crate::application::services::{CampaignService, MessageGenerationService, SettingsService};
use crate::domain::value_objects::REQUEST_TIMEOUT_LIMIT_SECS;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::hyperleap::HyperleapClient;
use crate::infrastructure::persistence::{
    self, SqliteCampaignRepository, SqliteSettingsRepository,
};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub settings_service: Arc<SettingsService>,
    pub generation_service: MessageGenerationService,
    pub campaign_service: CampaignService,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let pool = persistence::connect(&config.database_url).await?;

        let settings_repository = SqliteSettingsRepository::new(pool.clone(), config.generation_defaults())
            .await
            .context("Failed to initialize settings table")?;
        let campaign_repository = SqliteCampaignRepository::new(pool)
            .await
            .context("Failed to initialize campaigns table")?;

        // Per-attempt timeouts come from the admin settings; the client
        // only enforces the upper bound they are validated against.
        let hyperleap = HyperleapClient::new(
            &config.hyperleap_base_url,
            Duration::from_secs(REQUEST_TIMEOUT_LIMIT_SECS),
        )
        .context("Failed to build prompt-run HTTP client")?;

        Ok(Self::from_parts(
            config,
            Arc::new(settings_repository),
            Arc::new(hyperleap),
            Arc::new(campaign_repository),
        ))
    }

    /// Wire the services over the given adapters
    pub fn from_parts(
        config: AppConfig,
        settings_repository: Arc<dyn SettingsRepositoryPort>,
        prompt_runner: Arc<dyn PromptRunPort>,
        campaign_repository: Arc<dyn CampaignRepositoryPort>,
    ) -> Self {
        let settings_service = Arc::new(SettingsService::new(
            settings_repository,
            config.generation_defaults(),
        ));
        let generation_service =
            MessageGenerationService::new(prompt_runner, settings_service.clone());
        let campaign_service = CampaignService::new(campaign_repository);

        Self {
            config,
            settings_service,
            generation_service,
            campaign_service,
            shutdown: watch::Sender::new(false),
        }
    }

    /// Tell in-flight work that the server is stopping
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Resolves once `begin_shutdown` has been called, immediately if it already was
    pub fn shutting_down(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut receiver = self.shutdown.subscribe();
        async move {
            if receiver.wait_for(|stopping| *stopping).await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
