//! Replacement mapper - Campaign configuration to prompt placeholder values
//!
//! Total over its input: every key gets a value. A recognized raw value is
//! replaced by its fixed display string, an unrecognized one passes through
//! verbatim, and an empty one takes the key's default.

use tracing::debug;

use crate::domain::entities::CampaignConfiguration;
use crate::domain::value_objects::{
    ActivityWindow, AudienceType, BrandTone, CampaignGoal, CampaignOption, Channel,
    EngagementLevel, ReplacementMap, ToneStyle,
};

pub const DEFAULT_CHANNEL_TYPE: &str = "All channels";
pub const DEFAULT_USER_TYPE: &str = "All users";
pub const DEFAULT_CAMPAIGN_GOAL: &str = "Drive engagement";
pub const DEFAULT_USER_BEHAVIOR: &str = "All engagement levels";
pub const DEFAULT_ACTIVITY_PATTERN: &str = "Any activity window";
pub const DEFAULT_LOCATION: &str = "All locations";
pub const DEFAULT_TONE_STYLE: &str = "Friendly and conversational";
pub const DEFAULT_BRAND_TONE: &str = "Consistent with the brand voice";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_NUMBER_OF_VARIANTS: &str = "1";
pub const DEFAULT_DESIRED_OUTCOME: &str =
    "Increase user engagement and encourage users to take action";

/// Build the replacement values for a campaign
pub fn map_campaign_to_replacements(config: &CampaignConfiguration) -> ReplacementMap {
    let filters = &config.filters;
    let settings = &config.settings;

    let replacements = ReplacementMap {
        channel_type: lookup::<Channel>(&config.channel, DEFAULT_CHANNEL_TYPE),
        user_type: lookup::<AudienceType>(&config.audience_type, DEFAULT_USER_TYPE),
        campaign_goal: lookup::<CampaignGoal>(&config.campaign_goal, DEFAULT_CAMPAIGN_GOAL),
        user_behavior: lookup::<EngagementLevel>(&filters.engagement_level, DEFAULT_USER_BEHAVIOR),
        activity_pattern: lookup::<ActivityWindow>(
            &filters.activity_window,
            DEFAULT_ACTIVITY_PATTERN,
        ),
        location: location(&filters.location),
        tone_style: lookup::<ToneStyle>(&settings.tone_style, DEFAULT_TONE_STYLE),
        brand_tone: lookup::<BrandTone>(&settings.brand_tone, DEFAULT_BRAND_TONE),
        language: free_text(&settings.language, DEFAULT_LANGUAGE),
        number_of_variants: match settings.variant_count {
            0 => DEFAULT_NUMBER_OF_VARIANTS.to_string(),
            n => n.to_string(),
        },
        desired_outcome: free_text(&settings.desired_outcome, DEFAULT_DESIRED_OUTCOME),
    };

    debug!(?config, ?replacements, "Mapped campaign to replacements");

    replacements
}

/// Unrecognized values are forwarded exactly as entered, padding included
fn lookup<O: CampaignOption>(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default.to_string();
    }
    O::parse(trimmed)
        .map(|option| option.display().to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn free_text(raw: &str, default: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        default.to_string()
    } else {
        raw.to_string()
    }
}

fn location(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        DEFAULT_LOCATION.to_string()
    } else {
        raw.to_string()
    }
}
