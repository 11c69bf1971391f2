//! Channel entity - a publisher that owns content items

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Channel entity
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    pub picture_url: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub subscriber_count: i64,
    /// Derived: number of content items owned, maintained by the stats pass
    pub content_count: i64,
    /// Derived: sum of view counts across owned content
    pub total_views: i64,
    /// Derived: mean engagement score across owned content
    pub avg_engagement_rate: f64,
    /// Marks channels created for externally ingested sources
    pub is_external: bool,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            picture_url: None,
            description: None,
            tags: Vec::new(),
            subscriber_count: 0,
            content_count: 0,
            total_views: 0,
            avg_engagement_rate: 0.0,
            is_external: false,
            created_at: Utc::now(),
        }
    }

    /// Create a channel representing an external ingestion source
    pub fn new_external(id: Snowflake, name: String) -> Self {
        Self {
            is_external: true,
            ..Self::new(id, name)
        }
    }
}
