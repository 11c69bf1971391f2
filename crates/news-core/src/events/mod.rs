//! Domain events pushed to connected clients
//!
//! Emitted after interaction mutations and lifecycle transitions; delivery is
//! best-effort and must never fail the originating request.

use serde::{Deserialize, Serialize};

use crate::entities::{ActiveButton, Content};
use crate::value_objects::Snowflake;

/// Updated interaction counters for a content item, fanned out to clients
/// watching it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionUpdate {
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
    /// Reaction the acting user holds after this update
    pub active_button: ActiveButton,
}

impl ReactionUpdate {
    /// Snapshot the counters of a content item for fan-out
    pub fn from_content(content: &Content, active_button: ActiveButton) -> Self {
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

/// A Just-In item was promoted to Headline under a new id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPromoted {
    /// Id of the new Headline item
    pub content_id: Snowflake,
    /// Retired Just-In id
    pub previous_id: Snowflake,
    pub channel_id: Snowflake,
}
