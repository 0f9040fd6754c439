//! Campaign DTOs
//!
//! Field names follow the campaign builder's JSON (camelCase). The older
//! builder names (`userType`, `campaignType`, `engagement`, `activity`,
//! `numberOfVariants`) are accepted as aliases.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::services::{GeneratedMessage, MessageSource};
use crate::domain::entities::{
    CampaignConfiguration, CampaignFilters, CampaignRecord, CampaignSettings,
};
use crate::domain::value_objects::{
    ActivityWindow, AudienceType, BrandTone, CampaignGoal, CampaignOption, Channel,
    EngagementLevel, OptionEntry, ReplacementMap, ToneStyle, LANGUAGE_OPTIONS, LOCATION_OPTIONS,
    VARIANT_COUNT_OPTIONS,
};

/// Treat JSON `null` like an unset field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Variant count as sent by the UI: a number or a numeric string.
/// Any other JSON value is kept so the request still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantCountDto {
    Number(u64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for VariantCountDto {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl VariantCountDto {
    /// Zero stays zero (the mapper treats it as unset); unparseable text is 1
    pub fn resolve(&self) -> u32 {
        match self {
            Self::Number(n) => u32::try_from(*n).unwrap_or(u32::MAX),
            Self::Text(text) => text.trim().parse().unwrap_or(1),
            Self::Other(_) => 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignFiltersDto {
    #[serde(alias = "engagement", deserialize_with = "null_as_default")]
    pub engagement_level: String,
    #[serde(alias = "activity", deserialize_with = "null_as_default")]
    pub activity_window: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignSettingsDto {
    #[serde(alias = "numberOfVariants", deserialize_with = "null_as_default")]
    pub variant_count: VariantCountDto,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tone_style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand_tone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub desired_outcome: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignConfigurationDto {
    #[serde(deserialize_with = "null_as_default")]
    pub channel: String,
    #[serde(alias = "userType", deserialize_with = "null_as_default")]
    pub audience_type: String,
    #[serde(alias = "campaignType", deserialize_with = "null_as_default")]
    pub campaign_goal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filters: CampaignFiltersDto,
    #[serde(deserialize_with = "null_as_default")]
    pub settings: CampaignSettingsDto,
}

impl From<CampaignConfigurationDto> for CampaignConfiguration {
    fn from(dto: CampaignConfigurationDto) -> Self {
        Self::new(dto.channel, dto.audience_type, dto.campaign_goal)
            .with_filters(CampaignFilters {
                engagement_level: dto.filters.engagement_level,
                activity_window: dto.filters.activity_window,
                location: dto.filters.location,
            })
            .with_settings(CampaignSettings {
                variant_count: dto.settings.variant_count.resolve(),
                language: dto.settings.language,
                tone_style: dto.settings.tone_style,
                brand_tone: dto.settings.brand_tone,
                desired_outcome: dto.settings.desired_outcome,
            })
    }
}

impl From<&CampaignConfiguration> for CampaignConfigurationDto {
    fn from(config: &CampaignConfiguration) -> Self {
        Self {
            channel: config.channel.clone(),
            audience_type: config.audience_type.clone(),
            campaign_goal: config.campaign_goal.clone(),
            filters: CampaignFiltersDto {
                engagement_level: config.filters.engagement_level.clone(),
                activity_window: config.filters.activity_window.clone(),
                location: config.filters.location.clone(),
            },
            settings: CampaignSettingsDto {
                variant_count: VariantCountDto::Number(u64::from(config.settings.variant_count)),
                language: config.settings.language.clone(),
                tone_style: config.settings.tone_style.clone(),
                brand_tone: config.settings.brand_tone.clone(),
                desired_outcome: config.settings.desired_outcome.clone(),
            },
        }
    }
}

/// Generated variants returned to the UI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessageResponse {
    /// First variant, for single-message views
    pub message: String,
    pub variants: Vec<String>,
    /// "remote" or "fallback"
    pub source: String,
    pub replacements: ReplacementMap,
}

impl From<GeneratedMessage> for GenerateMessageResponse {
    fn from(generated: GeneratedMessage) -> Self {
        Self {
            message: generated.variants.first().cloned().unwrap_or_default(),
            source: match generated.source {
                MessageSource::Remote => "remote",
                MessageSource::Fallback => "fallback",
            }
            .to_string(),
            variants: generated.variants,
            replacements: generated.replacements,
        }
    }
}

/// Body for saving or launching a campaign
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCampaignRequestDto {
    #[serde(alias = "campaign")]
    pub configuration: CampaignConfigurationDto,
    #[serde(default, alias = "generatedMessage")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: String,
    pub configuration: CampaignConfigurationDto,
    pub generated_message: String,
    pub status: String,
    pub created_at: String,
    pub launched_at: Option<String>,
}

impl From<CampaignRecord> for CampaignResponse {
    fn from(record: CampaignRecord) -> Self {
        Self {
            id: record.id.to_string(),
            configuration: CampaignConfigurationDto::from(&record.configuration),
            generated_message: record.generated_message,
            status: record.status.as_str().to_string(),
            created_at: record.created_at.to_rfc3339(),
            launched_at: record.launched_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Error body the UI uses to choose between "retry" and "configuration"
/// notifications
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Everything the campaign builder's selectors offer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsCatalogResponse {
    pub channels: Vec<OptionEntry>,
    pub user_types: Vec<OptionEntry>,
    pub campaign_types: Vec<OptionEntry>,
    pub engagement_levels: Vec<OptionEntry>,
    pub activity_windows: Vec<OptionEntry>,
    pub locations: Vec<OptionEntry>,
    pub variant_counts: Vec<OptionEntry>,
    pub languages: Vec<OptionEntry>,
    pub tone_styles: Vec<OptionEntry>,
    pub brand_tones: Vec<OptionEntry>,
}

impl OptionsCatalogResponse {
    pub fn build() -> Self {
        Self {
            channels: Channel::catalog(),
            user_types: AudienceType::catalog(),
            campaign_types: CampaignGoal::catalog(),
            engagement_levels: EngagementLevel::catalog(),
            activity_windows: ActivityWindow::catalog(),
            locations: LOCATION_OPTIONS.to_vec(),
            variant_counts: VARIANT_COUNT_OPTIONS.to_vec(),
            languages: LANGUAGE_OPTIONS.to_vec(),
            tone_styles: ToneStyle::catalog(),
            brand_tones: BrandTone::catalog(),
        }
    }
}
