//! Outbound ports - Interfaces that the application requires from external systems

mod campaign_repository_port;
mod prompt_run_port;
mod settings_port;

pub use campaign_repository_port::{CampaignRepositoryError, CampaignRepositoryPort};
pub use prompt_run_port::{is_server_error, PromptRunError, PromptRunPort, PromptRunRequest};
pub use settings_port::{GenerationSettingsPort, SettingsError, SettingsRepositoryPort};
