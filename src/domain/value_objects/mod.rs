//! Value objects - Immutable objects defined by their attributes

mod campaign_options;
mod ids;
mod replacements;
mod settings;

pub use campaign_options::{
    ActivityWindow, AudienceType, BrandTone, CampaignGoal, CampaignOption, Channel,
    EngagementLevel, OptionEntry, ToneStyle, LANGUAGE_OPTIONS, LOCATION_OPTIONS,
    VARIANT_COUNT_OPTIONS,
};
pub use ids::*;
pub use replacements::ReplacementMap;
pub use settings::{GenerationSettings, MAX_BACKOFF_MS, REQUEST_TIMEOUT_LIMIT_SECS};
