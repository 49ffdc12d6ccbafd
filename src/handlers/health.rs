use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let skills_loaded = state.matcher.len();

    info!(skills_loaded = skills_loaded, "Health check requested");

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        skills_loaded,
    })
}

/// Readiness check: the service is only useful once it knows some skills.
pub async fn ready_handler(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    if !state.matcher.is_empty() {
        info!("Readiness check passed");
        Ok(StatusCode::OK)
    } else {
        info!("Readiness check failed - skill index is empty");
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
