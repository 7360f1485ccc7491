//! Health check endpoints

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /live
pub async fn live_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "alive" })
}

/// GET /ready - verifies the member store answers
pub async fn ready_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    match state.profiles.list_members().await {
        Ok(_) => Ok(Json(HealthResponse { status: "ready" })),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
