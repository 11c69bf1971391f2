//! Channel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub name: String,
    pub picture_url: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub subscriber_count: i64,
    pub content_count: i64,
    pub total_views: i64,
    pub avg_engagement_rate: f64,
    pub is_external: bool,
    pub created_at: DateTime<Utc>,
}
