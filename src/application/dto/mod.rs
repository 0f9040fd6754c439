//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP, SQLite) can
//! serialize/deserialize without pulling wire concerns into the domain model.

pub mod campaign;
pub mod settings;

pub use campaign::*;
pub use settings::*;
