//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles, accepting port
//! dependencies and returning domain entities or service-level results.

pub mod campaign_service;
pub mod message_generation_service;
pub mod settings_service;

pub use campaign_service::{CampaignService, CampaignServiceError, SaveCampaignRequest};
pub use message_generation_service::{
    GeneratedMessage, GenerationError, MessageGenerationService, MessageSource,
};
pub use settings_service::{SettingsService, UpdateSettingsRequest};
