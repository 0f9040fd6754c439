//! Prompt replacement values
//!
//! The key names are the placeholders of the remote prompt template.

use serde::{Deserialize, Serialize};

/// Flat set of placeholder values for one generation request.
///
/// Every key is always present; empty configuration fields are filled with
/// defaults by the replacement mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementMap {
    pub channel_type: String,
    pub user_type: String,
    pub campaign_goal: String,
    pub user_behavior: String,
    pub activity_pattern: String,
    pub location: String,
    pub tone_style: String,
    pub brand_tone: String,
    pub language: String,
    pub number_of_variants: String,
    pub desired_outcome: String,
}
