use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{SettingsResponse, UpdateSettingsRequestDto};
use crate::application::ports::outbound::SettingsError;
use crate::infrastructure::state::AppState;

pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsResponse> {
    Json(SettingsResponse::from(&state.settings_service.get().await))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateSettingsRequestDto>,
) -> Result<Json<SettingsResponse>, (StatusCode, String)> {
    state
        .settings_service
        .update(req.into())
        .await
        .map(|settings| Json(SettingsResponse::from(&settings)))
        .map_err(settings_error_response)
}

pub async fn reset_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, (StatusCode, String)> {
    state
        .settings_service
        .reset()
        .await
        .map(|settings| Json(SettingsResponse::from(&settings)))
        .map_err(settings_error_response)
}

fn settings_error_response(error: SettingsError) -> (StatusCode, String) {
    match error {
        SettingsError::Invalid(_) => (StatusCode::BAD_REQUEST, error.to_string()),
        SettingsError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
    }
}
