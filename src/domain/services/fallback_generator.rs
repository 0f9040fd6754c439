//! Local fallback generator
//!
//! Synthesizes campaign messages from replacement values without any network
//! access. Used when the prompt-run service is unavailable or no credential is
//! configured. Output is deterministic: variant `i` uses template
//! `i % templates.len()` for the campaign goal, then tone and brand voice are
//! applied on top.

use crate::domain::services::replacement_mapper::{DEFAULT_LOCATION, DEFAULT_USER_TYPE};
use crate::domain::value_objects::{BrandTone, CampaignGoal, CampaignOption, ReplacementMap, ToneStyle};

/// Upper bound on variants produced for a single request
pub const MAX_VARIANTS: usize = 10;

const FESTIVE_MARKER: &str = "🎉";
const URGENCY_MARKER: &str = "⚡";
const URGENCY_PREFIX: &str = "⚡ URGENT: ";

// Private-use code points standing in for campaign values while tone is applied
const AUDIENCE_SLOT: &str = "\u{E000}";
const LOCATION_SLOT: &str = "\u{E001}";
const LOCATION_CLAUSE: &str = " in \u{E001}";

const REENGAGEMENT_TEMPLATES: &[&str] = &[
    "Hey {audience}, we miss you! Your next trip{location} is just a tap away. Come back and see what's new.",
    "It's been a while, {audience}. We've made things better{location} and saved a spot for you. Open the app today.",
    "A welcome-back treat for {audience}: your favorite routes{location} are waiting. Jump back in today.",
];

const PROMOTION_TEMPLATES: &[&str] = &[
    "Good news, {audience}! Enjoy an exclusive discount on your next trip{location}. Offer ends soon.",
    "Special offer for {audience}: save more on every ride{location} this week. Tap to claim your deal.",
    "Deals are live{location}, {audience}. Grab your limited-time savings before they are gone.",
];

const LOYALTY_TEMPLATES: &[&str] = &[
    "Thank you for being with us, {audience}. As one of our most valued members, you have unlocked exclusive rewards{location}.",
    "Your loyalty means everything to us, {audience}. Enjoy priority perks reserved for our top members{location}.",
];

const BEHAVIORAL_TEMPLATES: &[&str] = &[
    "Quick tip for {audience}: schedule your next trip{location} in advance and skip the wait.",
    "Make the most of the app, {audience}. Try a new feature{location} today and earn bonus points.",
];

const GENERIC_TEMPLATES: &[&str] = &[
    "Hi {audience}, there is something new waiting for you{location}. Open the app to find out more.",
    "Do not miss out, {audience}. Check the app{location} for updates picked just for you.",
];

/// Parse the requested variant count; anything unusable means one variant
pub fn parse_variant_count(raw: &str) -> usize {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|count| *count > 0)
        .unwrap_or(1)
        .min(MAX_VARIANTS)
}

/// Generate every requested variant locally
pub fn generate_fallback_variants(replacements: &ReplacementMap) -> Vec<String> {
    let count = parse_variant_count(&replacements.number_of_variants);
    (0..count)
        .map(|index| generate_fallback_message(replacements, index))
        .collect()
}

/// Generate a single variant
pub fn generate_fallback_message(replacements: &ReplacementMap, variant_index: usize) -> String {
    let templates = templates_for(CampaignGoal::from_replacement(&replacements.campaign_goal));
    let template = templates[variant_index % templates.len()];

    // Tone rewriting sees placeholders only; campaign values are filled in after
    let skeleton = template
        .replace("{audience}", AUDIENCE_SLOT)
        .replace("{location}", location_clause(&replacements.location));

    let tone = ToneStyle::from_replacement(&replacements.tone_style);
    let skeleton = match tone {
        Some(tone) => apply_tone(&skeleton, tone),
        None => skeleton,
    };

    let mut audience = audience(&replacements.user_type);
    let mut location = replacements.location.trim().to_string();
    if tone == Some(ToneStyle::Urgent) {
        audience = audience.to_uppercase();
        location = location.to_uppercase();
    }
    let message = skeleton
        .replace(AUDIENCE_SLOT, &audience)
        .replace(LOCATION_SLOT, &location);

    let message = match BrandTone::from_replacement(&replacements.brand_tone) {
        Some(brand) => format!("{} {}", message, brand_closing(brand)),
        None => message,
    };

    message.trim().to_string()
}

fn templates_for(goal: Option<CampaignGoal>) -> &'static [&'static str] {
    match goal {
        Some(CampaignGoal::Reengagement) => REENGAGEMENT_TEMPLATES,
        Some(CampaignGoal::Promotions) => PROMOTION_TEMPLATES,
        Some(CampaignGoal::Loyalty) => LOYALTY_TEMPLATES,
        Some(CampaignGoal::Behavioral) => BEHAVIORAL_TEMPLATES,
        None => GENERIC_TEMPLATES,
    }
}

fn audience(user_type: &str) -> String {
    let user_type = user_type.trim();
    if user_type.is_empty() || user_type == DEFAULT_USER_TYPE {
        "everyone".to_string()
    } else {
        user_type.to_string()
    }
}

fn location_clause(location: &str) -> &'static str {
    let location = location.trim();
    if location.is_empty() || location == DEFAULT_LOCATION {
        ""
    } else {
        LOCATION_CLAUSE
    }
}

/// Closing fragment for a brand voice. No terminal punctuation, so tone
/// rewriting never touches it.
pub fn brand_closing(brand: BrandTone) -> &'static str {
    match brand {
        BrandTone::Trustworthy => "Safe, reliable rides you can count on every time",
        BrandTone::Innovative => "Powered by the latest in smart mobility",
        BrandTone::Friendly => "We are always here for you, every step of the way",
        BrandTone::Premium => "Crafted for those who expect the exceptional",
    }
}

fn apply_tone(message: &str, tone: ToneStyle) -> String {
    match tone {
        ToneStyle::Casual => message.to_string(),
        ToneStyle::Playful => add_festive_markers(message),
        ToneStyle::Urgent => format!(
            "{}{}",
            URGENCY_PREFIX,
            message.to_uppercase().replace('.', "!")
        ),
        ToneStyle::Professional => strip_markers(message),
    }
}

/// Append a festive marker after every sentence terminator
fn add_festive_markers(message: &str) -> String {
    let mut result = String::with_capacity(message.len() + 16);
    let mut chars = message.chars().peekable();
    while let Some(c) = chars.next() {
        result.push(c);
        let ends_sentence = matches!(c, '.' | '!' | '?')
            && chars.peek().map_or(true, |next| next.is_whitespace());
        if ends_sentence {
            result.push(' ');
            result.push_str(FESTIVE_MARKER);
        }
    }
    result
}

fn strip_markers(message: &str) -> String {
    message
        .replace(URGENCY_PREFIX, "")
        .replace("URGENT:", "")
        .replace(URGENCY_MARKER, "")
        .replace(FESTIVE_MARKER, "")
        .replace('!', ".")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CampaignConfiguration, CampaignFilters, CampaignSettings};
    use crate::domain::services::map_campaign_to_replacements;

    fn replacements(goal: &str, tone: &str, brand: &str, variants: u32) -> ReplacementMap {
        let config = CampaignConfiguration::new("push", "riders", goal).with_settings(
            CampaignSettings {
                variant_count: variants,
                tone_style: tone.to_string(),
                brand_tone: brand.to_string(),
                ..Default::default()
            },
        );
        map_campaign_to_replacements(&config)
    }

    #[test]
    fn test_parse_variant_count() {
        assert_eq!(parse_variant_count("3"), 3);
        assert_eq!(parse_variant_count(" 2 "), 2);
        assert_eq!(parse_variant_count("0"), 1);
        assert_eq!(parse_variant_count("three"), 1);
        assert_eq!(parse_variant_count(""), 1);
        assert_eq!(parse_variant_count("500"), MAX_VARIANTS);
    }

    #[test]
    fn test_variants_rotate_through_templates() {
        let map = replacements("reengagement", "", "", 3);
        let variants = generate_fallback_variants(&map);

        assert_eq!(variants.len(), 3);
        assert!(variants.iter().all(|v| !v.is_empty()));
        assert_ne!(variants[0], variants[1]);
        assert_ne!(variants[1], variants[2]);
        assert!(variants[0].contains("Riders"));
    }

    #[test]
    fn test_rotation_wraps_around() {
        let map = replacements("loyalty", "", "", 3);
        let variants = generate_fallback_variants(&map);
        assert_eq!(variants[0], variants[2]);
        assert_ne!(variants[0], variants[1]);
    }

    #[test]
    fn test_scenario_urgent_premium_sms_for_drivers() {
        let config = CampaignConfiguration::new("sms", "drivers", "loyalty")
            .with_filters(CampaignFilters {
                engagement_level: "high".to_string(),
                ..Default::default()
            })
            .with_settings(CampaignSettings {
                variant_count: 1,
                tone_style: "urgent".to_string(),
                brand_tone: "premium".to_string(),
                ..Default::default()
            });
        let map = map_campaign_to_replacements(&config);

        let variants = generate_fallback_variants(&map);
        assert_eq!(variants.len(), 1);

        let message = &variants[0];
        let closing = brand_closing(BrandTone::Premium);
        assert!(message.ends_with(closing));
        assert!(!message.contains('.'));
        assert!(message.contains('!'));
        assert!(message.starts_with(URGENCY_PREFIX));

        let body = message.strip_suffix(closing).unwrap();
        assert_eq!(body, body.to_uppercase());
        assert!(body.contains("DRIVER PARTNERS"));
    }

    #[test]
    fn test_playful_adds_festive_markers() {
        let message = generate_fallback_message(&replacements("promotions", "playful", "", 1), 0);
        assert!(message.contains(FESTIVE_MARKER));
        assert!(message.ends_with(FESTIVE_MARKER));
    }

    #[test]
    fn test_professional_strips_exclamations_and_markers() {
        let message =
            generate_fallback_message(&replacements("reengagement", "professional", "", 1), 0);
        assert!(!message.contains('!'));
        assert!(!message.contains(FESTIVE_MARKER));
        assert!(!message.contains(URGENCY_MARKER));
        assert!(message.starts_with("Hey Riders, we miss you."));
    }

    #[test]
    fn test_strip_markers_removes_urgency_prefix() {
        assert_eq!(strip_markers("⚡ URGENT: GO NOW! 🎉"), "GO NOW.");
    }

    #[test]
    fn test_each_brand_tone_appends_its_closing() {
        for brand in BrandTone::ALL {
            let message = generate_fallback_message(&replacements("behavioral", "casual", brand.value(), 1), 0);
            assert!(message.ends_with(brand_closing(*brand)));
        }
    }

    #[test]
    fn test_unknown_goal_uses_generic_templates() {
        let message = generate_fallback_message(&replacements("", "", "", 1), 0);
        assert!(message.starts_with("Hi Riders"));
    }

    #[test]
    fn test_location_and_default_audience() {
        let config = CampaignConfiguration::new("push", "", "promotions").with_filters(
            CampaignFilters {
                location: "Chicago".to_string(),
                ..Default::default()
            },
        );
        let message = generate_fallback_message(&map_campaign_to_replacements(&config), 0);
        assert!(message.contains("everyone"));
        assert!(message.contains(" in Chicago"));
    }

    fn with_location(tone: &str, location: &str) -> ReplacementMap {
        let config = CampaignConfiguration::new("push", "riders", "promotions")
            .with_filters(CampaignFilters {
                location: location.to_string(),
                ..Default::default()
            })
            .with_settings(CampaignSettings {
                variant_count: 1,
                tone_style: tone.to_string(),
                ..Default::default()
            });
        map_campaign_to_replacements(&config)
    }

    #[test]
    fn test_urgent_tone_keeps_punctuation_inside_values() {
        let message = generate_fallback_message(&with_location("urgent", "St. Louis"), 0);
        assert!(message.starts_with(URGENCY_PREFIX));
        assert!(message.contains(" IN ST. LOUIS"));
        assert!(!message.contains("ST!"));
    }

    #[test]
    fn test_playful_and_professional_leave_values_alone() {
        let playful = generate_fallback_message(&with_location("playful", "St. Louis"), 0);
        assert!(playful.contains(" in St. Louis"));

        let professional = generate_fallback_message(&with_location("professional", "Yahoo! Plaza"), 0);
        assert!(professional.contains(" in Yahoo! Plaza"));
        assert!(!professional.contains('\u{E000}'));
        assert!(!professional.contains('\u{E001}'));
    }
}
