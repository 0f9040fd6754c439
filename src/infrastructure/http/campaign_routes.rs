//! Campaign API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CampaignConfigurationDto, CampaignResponse, ErrorResponse, GenerateMessageResponse,
    OptionsCatalogResponse, SaveCampaignRequestDto,
};
use crate::application::services::{CampaignServiceError, GenerationError, SaveCampaignRequest};
use crate::domain::entities::CampaignConfiguration;
use crate::domain::value_objects::{CampaignId, ReplacementMap};
use crate::infrastructure::state::AppState;

/// Selector options for the campaign builder
pub async fn get_options() -> Json<OptionsCatalogResponse> {
    Json(OptionsCatalogResponse::build())
}

/// Preview the prompt replacements for a configuration
pub async fn preview_replacements(
    State(state): State<Arc<AppState>>,
    Json(config): Json<CampaignConfigurationDto>,
) -> Json<ReplacementMap> {
    let config = CampaignConfiguration::from(config);
    Json(state.generation_service.preview_replacements(&config))
}

/// Generate message variants.
///
/// A client disconnect drops this future, which aborts the remote call.
pub async fn generate_message(
    State(state): State<Arc<AppState>>,
    Json(config): Json<CampaignConfigurationDto>,
) -> Result<Json<GenerateMessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let config = CampaignConfiguration::from(config);
    state
        .generation_service
        .generate_until(&config, state.shutting_down())
        .await
        .map(|generated| Json(GenerateMessageResponse::from(generated)))
        .map_err(generation_error_response)
}

fn generation_error_response(error: GenerationError) -> (StatusCode, Json<ErrorResponse>) {
    let (code, status, details) = match &error {
        GenerationError::Rejected { status, body } => {
            (StatusCode::BAD_GATEWAY, Some(*status), Some(body.clone()))
        }
        GenerationError::Exhausted { last_error, .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, None, Some(last_error.clone()))
        }
        GenerationError::CredentialMissing | GenerationError::Cancelled => {
            (StatusCode::SERVICE_UNAVAILABLE, None, None)
        }
    };

    (
        code,
        Json(ErrorResponse {
            error: error.to_string(),
            kind: error.kind().as_str().to_string(),
            status,
            details,
        }),
    )
}

/// Launch a campaign
pub async fn launch_campaign(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveCampaignRequestDto>,
) -> Result<(StatusCode, Json<CampaignResponse>), (StatusCode, String)> {
    state
        .campaign_service
        .launch(save_request(req))
        .await
        .map(|record| (StatusCode::CREATED, Json(CampaignResponse::from(record))))
        .map_err(campaign_error_response)
}

/// Save a campaign draft
pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveCampaignRequestDto>,
) -> Result<(StatusCode, Json<CampaignResponse>), (StatusCode, String)> {
    state
        .campaign_service
        .save_draft(save_request(req))
        .await
        .map(|record| (StatusCode::CREATED, Json(CampaignResponse::from(record))))
        .map_err(campaign_error_response)
}

/// List stored campaigns, newest first
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CampaignResponse>>, (StatusCode, String)> {
    let campaigns = state
        .campaign_service
        .list()
        .await
        .map_err(campaign_error_response)?;

    Ok(Json(campaigns.into_iter().map(CampaignResponse::from).collect()))
}

/// Get a campaign by ID
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CampaignResponse>, (StatusCode, String)> {
    let campaign_id: CampaignId = id
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid campaign ID".to_string()))?;

    let record = state
        .campaign_service
        .get(campaign_id)
        .await
        .map_err(campaign_error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Campaign not found".to_string()))?;

    Ok(Json(CampaignResponse::from(record)))
}

fn save_request(req: SaveCampaignRequestDto) -> SaveCampaignRequest {
    SaveCampaignRequest {
        configuration: CampaignConfiguration::from(req.configuration),
        message: req.message,
    }
}

fn campaign_error_response(error: CampaignServiceError) -> (StatusCode, String) {
    match error {
        CampaignServiceError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        CampaignServiceError::Repository(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
