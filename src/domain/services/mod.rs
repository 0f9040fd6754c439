//! Domain services - Pure campaign logic with no I/O

pub mod fallback_generator;
pub mod replacement_mapper;

pub use fallback_generator::{generate_fallback_variants, parse_variant_count};
pub use replacement_mapper::map_campaign_to_replacements;
