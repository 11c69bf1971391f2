//! Channel handlers

use axum::{
    extract::{Path, State},
    Json,
};
use news_service::dto::{ChannelResponse, ChannelStatsResponse, CreateChannelRequest};
use news_service::{ChannelStatsService, ContentService};

use crate::extractors::parse_snowflake;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Create a publisher channel
///
/// POST /channels
pub async fn create_channel(
    State(state): State<AppState>,
    Json(request): Json<CreateChannelRequest>,
) -> ApiResult<Created<ApiJson<ChannelResponse>>> {
    let service = ContentService::new(state.service_context());
    let channel = service.create_channel(request).await?;
    Ok(Created(ApiJson(channel)))
}

/// Get a channel
///
/// GET /channels/{channel_id}
pub async fn get_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<ApiJson<ChannelResponse>> {
    let channel_id = parse_snowflake(&channel_id, "channel_id")?;
    let service = ContentService::new(state.service_context());
    let channel = service.get_channel(channel_id).await?;
    Ok(ApiJson(channel))
}

/// Recompute a channel's rollups on demand
///
/// POST /channels/{channel_id}/stats/recompute
pub async fn recompute_channel_stats(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<ApiJson<ChannelStatsResponse>> {
    let channel_id = parse_snowflake(&channel_id, "channel_id")?;
    let service = ChannelStatsService::new(state.service_context());
    let stats = service.recompute(channel_id).await?;
    Ok(ApiJson(stats))
}
