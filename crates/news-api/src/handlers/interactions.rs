//! Interaction handlers
//!
//! Endpoints for recording interactions and reading reaction summaries.

use axum::{
    extract::{Path, State},
    Json,
};
use news_service::dto::{ReactionSummaryResponse, RecordInteractionRequest};
use news_service::InteractionService;

use crate::extractors::{parse_snowflake, CurrentUser};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Record an interaction (view/like/dislike/comment/share/screenshot)
///
/// POST /contents/{content_id}/interactions
pub async fn record_interaction(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(content_id): Path<String>,
    Json(request): Json<RecordInteractionRequest>,
) -> ApiResult<ApiJson<ReactionSummaryResponse>> {
    let content_id = parse_snowflake(&content_id, "content_id")?;

    let service = InteractionService::new(state.service_context());
    let summary = service
        .record_interaction(content_id, user.user_id, request)
        .await?;
    Ok(ApiJson(summary))
}

/// Get the reaction summary for a content item
///
/// GET /contents/{content_id}/reactions
pub async fn get_reaction_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(content_id): Path<String>,
) -> ApiResult<ApiJson<ReactionSummaryResponse>> {
    let content_id = parse_snowflake(&content_id, "content_id")?;

    let service = InteractionService::new(state.service_context());
    let summary = service
        .get_reaction_summary(content_id, user.user_id)
        .await?;
    Ok(ApiJson(summary))
}
