//! Campaign option vocabularies
//!
//! Every selector in the campaign builder has a fixed vocabulary. The raw
//! `value` is what the UI sends; the `display` string is what the prompt-run
//! service receives as a replacement. Display strings are part of the
//! prompt template contract and must not be reworded.

use serde::Serialize;

/// Selector entry served to the UI
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Common behavior of every fixed campaign vocabulary
pub trait CampaignOption: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Raw value as sent by the UI
    fn value(self) -> &'static str;

    /// Text sent to the prompt-run service
    fn display(self) -> &'static str;

    /// Short label for selectors
    fn label(self) -> &'static str;

    fn description(self) -> &'static str;

    /// Parse a raw UI value (trimmed, case-insensitive)
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.value().eq_ignore_ascii_case(raw))
    }

    /// Resolve either a raw value or an already-mapped display string
    fn from_replacement(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::parse(value).or_else(|| {
            Self::ALL
                .iter()
                .copied()
                .find(|option| option.display() == value)
        })
    }

    fn catalog() -> Vec<OptionEntry> {
        Self::ALL
            .iter()
            .map(|option| OptionEntry {
                value: option.value(),
                label: option.label(),
                description: option.description(),
            })
            .collect()
    }
}

macro_rules! campaign_option {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($value:literal, $display:literal, $label:literal, $description:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl CampaignOption for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn display(self) -> &'static str {
                match self {
                    $(Self::$variant => $display),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $description),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

campaign_option! {
    /// Delivery channel for the campaign message
    Channel {
        Push => ("push", "Push Notification", "Push Notification", "In-app notifications"),
        Sms => ("sms", "SMS", "SMS", "Text messages"),
        Email => ("email", "Email", "Email", "Email campaigns"),
        WhatsApp => ("whatsapp", "WhatsApp", "WhatsApp", "WhatsApp Business"),
    }
}

campaign_option! {
    /// Who receives the campaign
    AudienceType {
        Riders => ("riders", "Riders", "Riders", "App users who request rides"),
        Drivers => ("drivers", "Driver Partners", "Driver Partners", "Driver-partners on the platform"),
    }
}

campaign_option! {
    /// What the campaign is trying to achieve
    CampaignGoal {
        Reengagement => ("reengagement", "Re-engage inactive users", "Re-engagement", "Win back inactive users"),
        Promotions => ("promotions", "Promote special offers and discounts", "Promotions", "Special offers and discounts"),
        Loyalty => ("loyalty", "Reward loyal customers", "Loyalty", "Reward frequent users"),
        Behavioral => ("behavioral", "Drive specific user behaviors", "Behavioral Nudges", "Drive specific actions"),
    }
}

campaign_option! {
    /// Engagement filter on the target audience
    EngagementLevel {
        High => ("high", "Highly engaged users", "High Engagement", "Frequent, recent activity"),
        Medium => ("medium", "Moderately engaged users", "Medium Engagement", "Occasional activity"),
        Low => ("low", "Low engagement users", "Low Engagement", "Rare activity"),
        Inactive => ("inactive", "Inactive users", "Inactive Users", "No recent activity"),
    }
}

campaign_option! {
    /// Activity-recency filter on the target audience
    ActivityWindow {
        SevenDays => ("7days", "Active in last 7 days", "Last 7 days", "Active within the past week"),
        ThirtyDays => ("30days", "Active in last 30 days", "Last 30 days", "Active within the past month"),
        NinetyDays => ("90days", "Active in last 90 days", "Last 90 days", "Active within the past quarter"),
        Never => ("never", "Never active", "Never active", "Signed up but never took a trip"),
    }
}

campaign_option! {
    /// Writing style of the message
    ToneStyle {
        Casual => ("casual", "Casual and friendly, like a message from a friend", "Casual & Friendly", "Relaxed, conversational wording"),
        Professional => ("professional", "Professional and polished, clear and respectful", "Professional", "Clear and courteous"),
        Urgent => ("urgent", "Urgent and action-oriented, creating a sense of immediacy", "Urgent & Action-oriented", "Push for an immediate response"),
        Playful => ("playful", "Playful and fun, lighthearted with a festive energy", "Playful & Fun", "Lighthearted and festive"),
    }
}

campaign_option! {
    /// Brand voice the message should carry
    BrandTone {
        Trustworthy => ("trustworthy", "Trustworthy and reliable, emphasizing safety and dependability", "Trustworthy & Reliable", "Safety and dependability first"),
        Innovative => ("innovative", "Innovative and modern, highlighting new features and technology", "Innovative & Modern", "New features and technology"),
        Friendly => ("friendly", "Friendly and approachable, warm and welcoming", "Friendly & Approachable", "Warm and welcoming"),
        Premium => ("premium", "Premium and sophisticated, conveying exclusivity and quality", "Premium & Sophisticated", "Exclusivity and quality"),
    }
}

pub const LOCATION_OPTIONS: &[OptionEntry] = &[
    OptionEntry { value: "all", label: "All Locations", description: "No location filter" },
    OptionEntry { value: "urban", label: "Urban Areas", description: "Dense city centers" },
    OptionEntry { value: "suburban", label: "Suburban Areas", description: "Residential outskirts" },
    OptionEntry { value: "specific", label: "Specific Cities", description: "A hand-picked list of cities" },
];

pub const VARIANT_COUNT_OPTIONS: &[OptionEntry] = &[
    OptionEntry { value: "1", label: "1 Variant", description: "A single message" },
    OptionEntry { value: "2", label: "2 Variants", description: "Two messages to compare" },
    OptionEntry { value: "3", label: "3 Variants", description: "Three messages to compare" },
    OptionEntry { value: "5", label: "5 Variants", description: "Five messages to compare" },
];

pub const LANGUAGE_OPTIONS: &[OptionEntry] = &[
    OptionEntry { value: "English", label: "English", description: "" },
    OptionEntry { value: "Spanish", label: "Spanish", description: "" },
    OptionEntry { value: "French", label: "French", description: "" },
    OptionEntry { value: "German", label: "German", description: "" },
    OptionEntry { value: "Portuguese", label: "Portuguese", description: "" },
    OptionEntry { value: "Italian", label: "Italian", description: "" },
];
