//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use news_core::{ActiveButton, Channel, Content, Snowflake};

/// Full content item response
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub title: String,
    pub message: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub screenshot_count: i64,
    pub view_count: i64,
    pub unique_viewers_count: i64,
    pub engagement_score: f64,
    pub viral_score: f64,
    pub is_just_in: bool,
    pub show_in_all_channels: bool,
    pub just_in_expires_at: Option<DateTime<Utc>>,
    pub headline_expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&Content> for ContentResponse {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id,
            channel_id: content.channel_id,
            title: content.title.clone(),
            message: content.message.clone(),
            image_url: content.image_url.clone(),
            tags: content.tags.clone(),
            like_count: content.like_count,
            dislike_count: content.dislike_count,
            comment_count: content.comment_count,
            share_count: content.share_count,
            screenshot_count: content.screenshot_count,
            view_count: content.view_count,
            unique_viewers_count: content.unique_viewers_count,
            engagement_score: content.engagement_score,
            viral_score: content.viral_score,
            is_just_in: content.is_just_in,
            show_in_all_channels: content.show_in_all_channels,
            just_in_expires_at: content.just_in_expires_at,
            headline_expires_at: content.headline_expires_at,
            created_at: content.created_at,
        }
    }
}

/// Counters, scores, and the caller's active reaction for one content item
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummaryResponse {
    pub content_id: Snowflake,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub screenshot_count: i64,
    pub view_count: i64,
    pub unique_viewers_count: i64,
    pub engagement_score: f64,
    pub viral_score: f64,
    pub active_button: ActiveButton,
}

impl ReactionSummaryResponse {
    pub fn new(content: &Content, active_button: ActiveButton) -> Self {
        Self {
            content_id: content.id,
            like_count: content.like_count,
            dislike_count: content.dislike_count,
            comment_count: content.comment_count,
            share_count: content.share_count,
            screenshot_count: content.screenshot_count,
            view_count: content.view_count,
            unique_viewers_count: content.unique_viewers_count,
            engagement_score: content.engagement_score,
            viral_score: content.viral_score,
            active_button,
        }
    }
}

/// Publisher channel response
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub id: Snowflake,
    pub name: String,
    pub picture_url: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub subscriber_count: i64,
    pub content_count: i64,
    pub total_views: i64,
    pub avg_engagement_rate: f64,
    pub is_external: bool,
}

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name.clone(),
            picture_url: channel.picture_url.clone(),
            description: channel.description.clone(),
            tags: channel.tags.clone(),
            subscriber_count: channel.subscriber_count,
            content_count: channel.content_count,
            total_views: channel.total_views,
            avg_engagement_rate: channel.avg_engagement_rate,
            is_external: channel.is_external,
        }
    }
}

/// Recomputed channel rollups
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStatsResponse {
    pub channel_id: Snowflake,
    pub content_count: i64,
    pub total_views: i64,
    pub avg_engagement_rate: f64,
}

/// Result of one lifecycle sweep pass
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SweepReport {
    /// Just-In items promoted to Headline
    pub promoted: u64,
    /// Items removed at their hard expiry
    pub expired_removed: u64,
    /// Items that failed to promote (logged, left for the next pass)
    pub failed: u64,
}

/// Result of one duplicate-cleanup pass
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CleanupReport {
    /// Duplicate groups found (size > 1)
    pub groups: u64,
    /// Content items removed
    pub removed: u64,
}
