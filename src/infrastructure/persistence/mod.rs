//! SQLite persistence adapters
//!
//! Campaign records and admin settings live in a single SQLite database.
//! Each repository creates its own table on construction.

mod campaign_repository;
mod settings_repository;

pub use campaign_repository::SqliteCampaignRepository;
pub use settings_repository::SqliteSettingsRepository;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Open (creating if needed) the SQLite database
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database {}", database_url))
}

/// Single-connection in-memory pool; every connection to `sqlite::memory:`
/// would otherwise see its own empty database
#[cfg(test)]
pub async fn connect_in_memory() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}
