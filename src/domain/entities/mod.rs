//! Domain entities - Core business objects with identity

mod campaign;

pub use campaign::{
    CampaignConfiguration, CampaignFilters, CampaignRecord, CampaignSettings, CampaignStatus,
};
