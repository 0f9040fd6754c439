//! Campaign repository port - Storage for drafted and launched campaigns

use async_trait::async_trait;

use crate::domain::entities::CampaignRecord;
use crate::domain::value_objects::CampaignId;

#[derive(Debug, thiserror::Error)]
pub enum CampaignRepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Corrupt campaign row {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

#[async_trait]
pub trait CampaignRepositoryPort: Send + Sync {
    async fn create(&self, record: &CampaignRecord) -> Result<(), CampaignRepositoryError>;
    async fn get(&self, id: CampaignId) -> Result<Option<CampaignRecord>, CampaignRepositoryError>;
    /// All campaigns, newest first
    async fn list(&self) -> Result<Vec<CampaignRecord>, CampaignRepositoryError>;
}
