//! Campaign Service - Saving drafts and launching campaigns
//!
//! Generation produces text only; this service is where a configuration and
//! the operator's chosen message become a stored campaign.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::ports::outbound::{CampaignRepositoryError, CampaignRepositoryPort};
use crate::domain::entities::{CampaignConfiguration, CampaignRecord};
use crate::domain::value_objects::CampaignId;

/// Request to store a campaign
#[derive(Debug, Clone)]
pub struct SaveCampaignRequest {
    pub configuration: CampaignConfiguration,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CampaignServiceError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] CampaignRepositoryError),
}

pub struct CampaignService {
    repository: Arc<dyn CampaignRepositoryPort>,
}

impl CampaignService {
    pub fn new(repository: Arc<dyn CampaignRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Launch a campaign: requires channel, audience, goal and a message
    #[instrument(skip_all, fields(channel = %request.configuration.channel))]
    pub async fn launch(
        &self,
        request: SaveCampaignRequest,
    ) -> Result<CampaignRecord, CampaignServiceError> {
        let missing = request.configuration.missing_required_fields();
        if !missing.is_empty() {
            return Err(CampaignServiceError::Validation(format!(
                "Missing required selections: {}",
                missing.join(", ")
            )));
        }
        let message = Self::validate_message(&request.message)?;

        let record = CampaignRecord::launched(request.configuration, message);
        self.repository.create(&record).await?;

        info!(
            campaign_id = %record.id,
            goal = %record.configuration.campaign_goal,
            audience = %record.configuration.audience_type,
            "Campaign launched"
        );
        Ok(record)
    }

    /// Store an unfinished campaign; the message may be empty
    #[instrument(skip_all)]
    pub async fn save_draft(
        &self,
        request: SaveCampaignRequest,
    ) -> Result<CampaignRecord, CampaignServiceError> {
        let record = CampaignRecord::draft(request.configuration, request.message.trim());
        self.repository.create(&record).await?;
        info!(campaign_id = %record.id, "Campaign draft saved");
        Ok(record)
    }

    pub async fn get(&self, id: CampaignId) -> Result<Option<CampaignRecord>, CampaignServiceError> {
        Ok(self.repository.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<CampaignRecord>, CampaignServiceError> {
        Ok(self.repository.list().await?)
    }

    fn validate_message(message: &str) -> Result<&str, CampaignServiceError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CampaignServiceError::Validation(
                "Generate or write a message before launching".to_string(),
            ));
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::entities::CampaignStatus;

    #[derive(Default)]
    struct MemoryRepository {
        records: Mutex<Vec<CampaignRecord>>,
    }

    #[async_trait]
    impl CampaignRepositoryPort for MemoryRepository {
        async fn create(&self, record: &CampaignRecord) -> Result<(), CampaignRepositoryError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn get(
            &self,
            id: CampaignId,
        ) -> Result<Option<CampaignRecord>, CampaignRepositoryError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<CampaignRecord>, CampaignRepositoryError> {
            Ok(self.records.lock().unwrap().iter().rev().cloned().collect())
        }
    }

    fn request(goal: &str, message: &str) -> SaveCampaignRequest {
        SaveCampaignRequest {
            configuration: CampaignConfiguration::new("email", "riders", goal),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_launch_stores_active_record() {
        let service = CampaignService::new(Arc::new(MemoryRepository::default()));

        let record = service
            .launch(request("promotions", "  Save 20% this week \n"))
            .await
            .unwrap();

        assert_eq!(record.status, CampaignStatus::Active);
        assert_eq!(record.generated_message, "Save 20% this week");
        assert!(record.launched_at.is_some());

        let stored = service.get(record.id).await.unwrap().unwrap();
        assert_eq!(stored.id, record.id);
    }

    #[tokio::test]
    async fn test_launch_requires_selections_and_message() {
        let service = CampaignService::new(Arc::new(MemoryRepository::default()));

        let err = service.launch(request("", "Hello")).await.unwrap_err();
        assert!(matches!(err, CampaignServiceError::Validation(ref m) if m.contains("campaign_goal")));

        let err = service.launch(request("loyalty", "   ")).await.unwrap_err();
        assert!(matches!(err, CampaignServiceError::Validation(_)));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_draft_allows_incomplete_configuration() {
        let service = CampaignService::new(Arc::new(MemoryRepository::default()));

        let record = service.save_draft(request("", "")).await.unwrap();

        assert_eq!(record.status, CampaignStatus::Draft);
        assert!(record.launched_at.is_none());
        assert_eq!(service.list().await.unwrap().len(), 1);
    }
}
