//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with user-supplied text
//! also implement `Validate`.

use serde::Deserialize;
use validator::Validate;

/// Record an interaction on a content item.
///
/// `interaction_type` is parsed against the enumerated domain type; unknown
/// values are rejected, never silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordInteractionRequest {
    pub interaction_type: String,

    /// Seconds spent, for view interactions that report it
    pub duration_secs: Option<i32>,
    pub device: Option<String>,
    pub platform: Option<String>,
}

impl RecordInteractionRequest {
    pub fn new(interaction_type: impl Into<String>) -> Self {
        Self {
            interaction_type: interaction_type.into(),
            duration_secs: None,
            device: None,
            platform: None,
        }
    }
}

/// Create authored content (enters directly at Headline state)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContentRequest {
    pub channel_id: String,

    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Message must be 1-10000 characters"))]
    pub message: String,

    pub image_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Publish as a Just-In flash item instead of a direct headline
    #[serde(default)]
    pub just_in: bool,
}

/// Ingest an externally sourced article (always enters at Just-In state)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngestContentRequest {
    pub channel_id: String,

    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Message must be 1-10000 characters"))]
    pub message: String,

    #[validate(url(message = "source_url must be a valid URL"))]
    pub source_url: String,

    pub image_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Create a publisher channel
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub picture_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_external: bool,
}
