//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{channels, contents, health, interactions, maintenance};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass request middleware)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(channel_routes())
        .merge(content_routes())
        .merge(maintenance_routes())
}

/// Channel routes
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route("/channels", post(channels::create_channel))
        .route("/channels/:channel_id", get(channels::get_channel))
        .route(
            "/channels/:channel_id/stats/recompute",
            post(channels::recompute_channel_stats),
        )
}

/// Content and interaction routes
fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/contents", post(contents::create_content))
        .route("/contents/ingest", post(contents::ingest_content))
        // Static segments before the :content_id match
        .route("/contents/just-in", get(contents::list_just_in))
        .route("/contents/headlines", get(contents::list_headlines))
        .route("/contents/:content_id", get(contents::get_content))
        .route(
            "/contents/:content_id/interactions",
            post(interactions::record_interaction),
        )
        .route(
            "/contents/:content_id/reactions",
            get(interactions::get_reaction_summary),
        )
}

/// Maintenance routes
fn maintenance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/maintenance/lifecycle-sweep",
            post(maintenance::run_lifecycle_sweep),
        )
        .route(
            "/maintenance/duplicate-cleanup",
            post(maintenance::run_duplicate_cleanup),
        )
}
