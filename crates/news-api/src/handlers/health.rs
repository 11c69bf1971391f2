//! Health check handlers

use axum::extract::State;
use news_core::Snowflake;
use serde::Serialize;

use crate::response::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> ApiJson<HealthResponse> {
    ApiJson(HealthResponse { status: "ok" })
}

/// Readiness probe: round-trips the database
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> ApiResult<ApiJson<HealthResponse>> {
    state
        .service_context()
        .content_repo()
        .find_by_id(Snowflake::new(0))
        .await
        .map_err(|e| ApiError::internal(anyhow::anyhow!("database not ready: {e}")))?;

    Ok(ApiJson(HealthResponse { status: "ready" }))
}
