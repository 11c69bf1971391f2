//! Maintenance handlers
//!
//! On-demand triggers for the idempotent background passes. Safe to invoke
//! while the scheduled jobs run.

use axum::extract::State;
use news_service::dto::{CleanupReport, SweepReport};
use news_service::{DuplicationService, LifecycleService};

use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Run one lifecycle sweep pass
///
/// POST /maintenance/lifecycle-sweep
pub async fn run_lifecycle_sweep(
    State(state): State<AppState>,
) -> ApiResult<ApiJson<SweepReport>> {
    let service = LifecycleService::new(state.service_context());
    let report = service.run_sweep().await?;
    Ok(ApiJson(report))
}

/// Run one duplicate-cleanup pass
///
/// POST /maintenance/duplicate-cleanup
pub async fn run_duplicate_cleanup(
    State(state): State<AppState>,
) -> ApiResult<ApiJson<CleanupReport>> {
    let service = DuplicationService::new(state.service_context());
    let report = service.run_cleanup().await?;
    Ok(ApiJson(report))
}
