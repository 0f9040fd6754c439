//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite adapters for campaigns and settings
//! - HTTP: REST API routes
//! - Hyperleap: prompt-run client for remote message generation
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod hyperleap;
pub mod persistence;
pub mod state;
