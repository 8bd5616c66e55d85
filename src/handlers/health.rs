use axum::{extract::State, Json};
use crate::AppState;
use crate::models::{HealthResponse, ReadyResponse};
use tracing::debug;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint
pub async fn ready_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    debug!("Readiness check requested");
    let students = state.relay.student_count().await as u32;
    Json(ReadyResponse {
        status: "ok".to_string(),
        message: "Service is ready".to_string(),
        students,
    })
}
