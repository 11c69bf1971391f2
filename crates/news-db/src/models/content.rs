//! Content database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the contents table
#[derive(Debug, Clone, FromRow)]
pub struct ContentModel {
    pub id: i64,
    pub channel_id: i64,
    pub title: String,
    pub message: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub external_id: Option<String>,
    pub source_url: Option<String>,
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
    pub uploaded_at: DateTime<Utc>,
}

impl ContentModel {
    /// Check if the item is externally ingested
    #[inline]
    pub fn is_external(&self) -> bool {
        self.external_id.is_some()
    }
}
