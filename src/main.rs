//! Campaign Console Engine - Backend API for AI-assisted marketing campaigns
//!
//! The Engine is the backend server that:
//! - Serves the campaign builder's option catalog
//! - Generates campaign messages through the Hyperleap prompt-run API,
//!   with retries and a local fallback
//! - Stores drafted and launched campaigns in SQLite

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_console_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Campaign Console Engine");

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Database: {}", config.database_url);
    tracing::info!("  Prompt-run API: {}", config.hyperleap_base_url);
    if config.hyperleap_api_key.is_none() {
        tracing::warn!("  HYPERLEAP_API_KEY not set; messages are generated locally until a key is configured");
    }

    // Initialize application state
    let state = AppState::new(config).await?;
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        // Merge REST API routes
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start the server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // On Ctrl+C, stop accepting connections and cancel pending generations
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
            state.begin_shutdown();
        })
        .await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
