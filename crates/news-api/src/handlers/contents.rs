//! Content handlers
//!
//! Authoring, ingestion, and feed listing endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use news_service::dto::{ContentResponse, CreateContentRequest, IngestContentRequest};
use news_service::{ContentService, LifecycleService};
use serde::Deserialize;

use crate::extractors::{parse_snowflake, Pagination};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Create authored content
///
/// POST /contents
pub async fn create_content(
    State(state): State<AppState>,
    Json(request): Json<CreateContentRequest>,
) -> ApiResult<Created<ApiJson<ContentResponse>>> {
    let service = ContentService::new(state.service_context());
    let content = service.create(request).await?;
    Ok(Created(ApiJson(content)))
}

/// Ingest an externally sourced article
///
/// POST /contents/ingest
pub async fn ingest_content(
    State(state): State<AppState>,
    Json(request): Json<IngestContentRequest>,
) -> ApiResult<Created<ApiJson<ContentResponse>>> {
    let service = ContentService::new(state.service_context());
    let content = service.ingest(request).await?;
    Ok(Created(ApiJson(content)))
}

/// Get one content item
///
/// GET /contents/{content_id}
pub async fn get_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> ApiResult<ApiJson<ContentResponse>> {
    let content_id = parse_snowflake(&content_id, "content_id")?;
    let service = ContentService::new(state.service_context());
    let content = service.get(content_id).await?;
    Ok(ApiJson(content))
}

/// Just-In feed query parameters
#[derive(Debug, Deserialize)]
pub struct JustInParams {
    /// Hide items whose flash window already elapsed (default true)
    #[serde(default = "default_exclude_expired")]
    pub exclude_expired: bool,
    /// Channel whose items should sort first
    pub channel_id: Option<String>,
}

fn default_exclude_expired() -> bool {
    true
}

/// List the Just-In feed
///
/// GET /contents/just-in
pub async fn list_just_in(
    State(state): State<AppState>,
    Query(params): Query<JustInParams>,
    pagination: Pagination,
) -> ApiResult<ApiJson<Vec<ContentResponse>>> {
    let preferred_channel = params
        .channel_id
        .as_deref()
        .map(|raw| parse_snowflake(raw, "channel_id"))
        .transpose()?;

    let service = LifecycleService::new(state.service_context());
    let contents = service
        .list_just_in(params.exclude_expired, preferred_channel, pagination.limit)
        .await?;
    Ok(ApiJson(contents))
}

/// List the Headline feed
///
/// GET /contents/headlines
pub async fn list_headlines(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<ApiJson<Vec<ContentResponse>>> {
    let service = LifecycleService::new(state.service_context());
    let contents = service.list_headline(pagination.limit).await?;
    Ok(ApiJson(contents))
}
