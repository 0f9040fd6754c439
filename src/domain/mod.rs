//! Domain layer - Core campaign logic with no external dependencies
//!
//! This layer contains:
//! - Entities: CampaignConfiguration, CampaignRecord
//! - Value Objects: option vocabularies, ReplacementMap, GenerationSettings
//! - Domain Services: replacement mapping and local message synthesis

pub mod entities;
pub mod services;
pub mod value_objects;
