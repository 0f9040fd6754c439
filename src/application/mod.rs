//! Application layer - Use cases, ports and DTOs
//!
//! Services here orchestrate domain logic and talk to the outside world only
//! through the outbound port traits.

pub mod dto;
pub mod ports;
pub mod services;
