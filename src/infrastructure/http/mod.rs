//! HTTP REST API routes

mod campaign_routes;
mod settings_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Campaign builder
        .route("/api/options", get(campaign_routes::get_options))
        .route(
            "/api/campaigns/replacements",
            post(campaign_routes::preview_replacements),
        )
        .route(
            "/api/campaigns/generate",
            post(campaign_routes::generate_message),
        )
        // Campaign records
        .route("/api/campaigns", get(campaign_routes::list_campaigns))
        .route("/api/campaigns", post(campaign_routes::launch_campaign))
        .route("/api/campaigns/drafts", post(campaign_routes::save_draft))
        .route("/api/campaigns/{id}", get(campaign_routes::get_campaign))
        // Admin settings
        .route(
            "/api/settings",
            get(settings_routes::get_settings).put(settings_routes::update_settings),
        )
        .route("/api/settings/reset", post(settings_routes::reset_settings))
}
