//! Campaign entity - A configured marketing campaign and its launch record

use chrono::{DateTime, Utc};

use crate::domain::value_objects::CampaignId;

/// Audience filters chosen in the targeting step
///
/// Fields hold raw UI values and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignFilters {
    pub engagement_level: String,
    pub activity_window: String,
    /// Free text, or "all"
    pub location: String,
}

/// Message settings chosen in the targeting step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSettings {
    pub variant_count: u32,
    pub language: String,
    pub tone_style: String,
    pub brand_tone: String,
    /// Optional operator-written outcome statement
    pub desired_outcome: String,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            variant_count: 1,
            language: "English".to_string(),
            tone_style: String::new(),
            brand_tone: String::new(),
            desired_outcome: String::new(),
        }
    }
}

/// Everything the operator selected for a campaign.
///
/// Enum-like fields keep the raw value so that novel values pass through to
/// the prompt unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignConfiguration {
    pub channel: String,
    pub audience_type: String,
    pub campaign_goal: String,
    pub filters: CampaignFilters,
    pub settings: CampaignSettings,
}

impl CampaignConfiguration {
    pub fn new(
        channel: impl Into<String>,
        audience_type: impl Into<String>,
        campaign_goal: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            audience_type: audience_type.into(),
            campaign_goal: campaign_goal.into(),
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: CampaignFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_settings(mut self, settings: CampaignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Names of the selections required before a campaign can be launched
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("channel", &self.channel),
            ("audience_type", &self.audience_type),
            ("campaign_goal", &self.campaign_goal),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Lifecycle status of a stored campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A campaign handed to persistence, either as a draft or launched
#[derive(Debug, Clone)]
pub struct CampaignRecord {
    pub id: CampaignId,
    pub configuration: CampaignConfiguration,
    /// The message the operator chose (possibly edited after generation)
    pub generated_message: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub launched_at: Option<DateTime<Utc>>,
}

impl CampaignRecord {
    pub fn draft(configuration: CampaignConfiguration, message: impl Into<String>) -> Self {
        Self {
            id: CampaignId::new(),
            configuration,
            generated_message: message.into(),
            status: CampaignStatus::Draft,
            created_at: Utc::now(),
            launched_at: None,
        }
    }

    pub fn launched(configuration: CampaignConfiguration, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            status: CampaignStatus::Active,
            created_at: now,
            launched_at: Some(now),
            ..Self::draft(configuration, message)
        }
    }
}
