//! Real-time push port
//!
//! The transport (Redis pub/sub feeding WebSocket gateways) lives outside the
//! core; failure to deliver must never fail the originating request, so
//! callers invoke these fire-and-forget and only log errors.

use async_trait::async_trait;

use crate::events::{ContentPromoted, ReactionUpdate};
use crate::traits::repositories::RepoResult;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Fan out updated counters for a content item
    async fn publish_reaction_update(&self, update: &ReactionUpdate) -> RepoResult<()>;

    /// Announce a Just-In item's promotion to Headline
    async fn publish_content_promoted(&self, event: &ContentPromoted) -> RepoResult<()>;
}
