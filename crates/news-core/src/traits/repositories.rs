//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines the document-store capabilities it needs; the
//! infrastructure layer provides the implementation. Counter mutations are
//! atomic per-field increments, never whole-document read-modify-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Channel, Content, CounterField, InteractionRecord, InteractionType};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Listing options for the Just-In feed
#[derive(Debug, Clone, Default)]
pub struct JustInQuery {
    /// Include items whose flash window already elapsed (sweep lag)
    pub include_expired: bool,
    /// Items from this channel sort first
    pub preferred_channel: Option<Snowflake>,
    pub limit: i64,
}

// ============================================================================
// Content Repository
// ============================================================================

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Find content by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Content>>;

    /// Insert a new content item
    async fn create(&self, content: &Content) -> RepoResult<()>;

    /// Delete a content item; returns whether a row existed
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// List items still in (or just out of) the Just-In window, newest first
    async fn list_just_in(&self, query: JustInQuery) -> RepoResult<Vec<Content>>;

    /// List headline-state items, newest first.
    ///
    /// Must treat `just_in_expires_at <= now` as Headline even while
    /// `is_just_in` is still set, and must exclude items past their hard
    /// expiry.
    async fn list_headline(&self, limit: i64) -> RepoResult<Vec<Content>>;

    /// All content owned by a channel
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<Content>>;

    /// Just-In items whose window elapsed, oldest first (promotion sweep)
    async fn find_expired_just_in(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Content>>;

    /// Remove items past their hard expiry; returns removed count
    async fn delete_expired_headlines(&self, now: DateTime<Utc>) -> RepoResult<u64>;

    /// Atomically add `delta` to one counter, flooring the result at zero
    async fn increment_counter(
        &self,
        id: Snowflake,
        field: CounterField,
        delta: i64,
    ) -> RepoResult<()>;

    /// Record a user in the unique-viewer set.
    ///
    /// Returns `true` and bumps `unique_viewers_count` only on first
    /// membership; subsequent calls are no-ops returning `false`.
    async fn add_unique_viewer(&self, content_id: Snowflake, user_id: Snowflake)
        -> RepoResult<bool>;

    /// Copy the unique-viewer membership set from one item to another
    /// (promotion keeps the set so viewers are never counted twice)
    async fn copy_viewers(&self, from: Snowflake, to: Snowflake) -> RepoResult<u64>;

    /// Persist freshly computed scores onto the item
    async fn update_scores(&self, id: Snowflake, engagement: f64, viral: f64) -> RepoResult<()>;

    /// Whether an externally derived id is already present
    async fn external_id_exists(&self, external_id: &str) -> RepoResult<bool>;

    /// All externally ingested content (has an external id), for the
    /// duplicate-cleanup pass
    async fn find_external(&self) -> RepoResult<Vec<Content>>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// Insert a new channel
    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    /// List all channels
    async fn list(&self) -> RepoResult<Vec<Channel>>;

    /// Persist recomputed rollups for a channel
    async fn update_stats(
        &self,
        id: Snowflake,
        content_count: i64,
        total_views: i64,
        avg_engagement_rate: f64,
    ) -> RepoResult<()>;
}

// ============================================================================
// Interaction Repository
// ============================================================================

/// What an atomic reaction toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No prior reaction; record inserted
    Inserted,
    /// Same reaction existed; record removed
    Removed,
    /// Opposite reaction existed; record flipped in place
    Switched { previous: InteractionType },
}

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Atomically toggle a like/dislike record for (user, content).
    ///
    /// Concurrent toggles for the same pair are serialized by the store; two
    /// racing calls must never both observe "no existing record".
    async fn toggle_reaction(&self, record: &InteractionRecord) -> RepoResult<ToggleOutcome>;

    /// Append an interaction record (view/comment/share/screenshot)
    async fn append(&self, record: &InteractionRecord) -> RepoResult<()>;

    /// The user's current like/dislike record on a content item, if any
    async fn find_reaction(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<InteractionRecord>>;

    /// Most recent view record for (user, content) at or after `since`
    async fn find_view_since(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<InteractionRecord>>;

    /// Drop all ledger records for a content item (content removal)
    async fn delete_by_content(&self, content_id: Snowflake) -> RepoResult<u64>;
}
