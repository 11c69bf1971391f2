//! In-memory ports for tests
//!
//! One `MemoryStore` backs all three repositories; a single mutex per
//! collection keeps toggle semantics trivially serialized, matching the
//! row-lock behavior of the SQL implementation.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use news_core::entities::{Channel, Content, CounterField, InteractionRecord, InteractionType};
use news_core::events::{ContentPromoted, ReactionUpdate};
use news_core::traits::{
    ChannelRepository, ContentRepository, EventPublisher, InteractionRepository, JustInQuery,
    RepoResult, ToggleOutcome,
};
use news_core::{DomainError, Snowflake};

/// Shared in-memory document store
#[derive(Default)]
pub struct MemoryStore {
    contents: Mutex<HashMap<Snowflake, Content>>,
    viewers: Mutex<HashMap<Snowflake, HashSet<Snowflake>>>,
    channels: Mutex<HashMap<Snowflake, Channel>>,
    interactions: Mutex<Vec<InteractionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Direct snapshot of a content item (test assertions)
    pub fn content(&self, id: Snowflake) -> Option<Content> {
        self.contents.lock().unwrap().get(&id).cloned()
    }

    /// All stored content ids
    pub fn content_ids(&self) -> Vec<Snowflake> {
        self.contents.lock().unwrap().keys().copied().collect()
    }

    /// Number of ledger records for a content item
    pub fn ledger_len(&self, content_id: Snowflake) -> usize {
        self.interactions
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.content_id == content_id)
            .count()
    }

    /// Overwrite a stored content item (test seeding)
    pub fn put_content(&self, content: Content) {
        self.contents.lock().unwrap().insert(content.id, content);
    }

    /// Shift every view record for (content, user) to a new timestamp
    /// (simulates views recorded outside the dedup window)
    pub fn backdate_views(&self, content_id: Snowflake, user_id: Snowflake, to: DateTime<Utc>) {
        let mut interactions = self.interactions.lock().unwrap();
        for record in interactions.iter_mut() {
            if record.content_id == content_id
                && record.user_id == user_id
                && record.interaction_type == InteractionType::View
            {
                record.created_at = to;
            }
        }
    }
}

/// Content repository over the shared store
#[derive(Clone)]
pub struct MemoryContentRepository(pub Arc<MemoryStore>);

#[async_trait]
impl ContentRepository for MemoryContentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Content>> {
        Ok(self.0.contents.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, content: &Content) -> RepoResult<()> {
        let mut contents = self.0.contents.lock().unwrap();
        if contents.contains_key(&content.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate id {}",
                content.id
            )));
        }
        contents.insert(content.id, content.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let existed = self.0.contents.lock().unwrap().remove(&id).is_some();
        if existed {
            self.0.viewers.lock().unwrap().remove(&id);
        }
        Ok(existed)
    }

    async fn list_just_in(&self, query: JustInQuery) -> RepoResult<Vec<Content>> {
        let now = Utc::now();
        let mut items: Vec<Content> = self
            .0
            .contents
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.is_just_in && c.headline_expires_at > now)
            .filter(|c| query.include_expired || c.just_in_expires_at.is_some_and(|t| t > now))
            .cloned()
            .collect();

        items.sort_by_key(|c| {
            let preferred = query.preferred_channel == Some(c.channel_id);
            (std::cmp::Reverse(preferred), std::cmp::Reverse(c.created_at))
        });
        items.truncate(query.limit.clamp(1, 100) as usize);
        Ok(items)
    }

    async fn list_headline(&self, limit: i64) -> RepoResult<Vec<Content>> {
        let now = Utc::now();
        let mut items: Vec<Content> = self
            .0
            .contents
            .lock()
            .unwrap()
            .values()
            .filter(|c| !c.is_just_in || c.just_in_expires_at.is_some_and(|t| t <= now))
            .filter(|c| c.headline_expires_at > now)
            .cloned()
            .collect();

        items.sort_by_key(|c| std::cmp::Reverse(c.created_at));
        items.truncate(limit.clamp(1, 100) as usize);
        Ok(items)
    }

    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<Content>> {
        Ok(self
            .0
            .contents
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn find_expired_just_in(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Content>> {
        let mut items: Vec<Content> = self
            .0
            .contents
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.just_in_window_elapsed(now))
            .cloned()
            .collect();

        items.sort_by_key(|c| c.just_in_expires_at);
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn delete_expired_headlines(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut contents = self.0.contents.lock().unwrap();
        let before = contents.len();
        contents.retain(|_, c| !c.headline_expired(now));
        Ok((before - contents.len()) as u64)
    }

    async fn increment_counter(
        &self,
        id: Snowflake,
        field: CounterField,
        delta: i64,
    ) -> RepoResult<()> {
        let mut contents = self.0.contents.lock().unwrap();
        if let Some(content) = contents.get_mut(&id) {
            let slot = match field {
                CounterField::Like => &mut content.like_count,
                CounterField::Dislike => &mut content.dislike_count,
                CounterField::Comment => &mut content.comment_count,
                CounterField::Share => &mut content.share_count,
                CounterField::Screenshot => &mut content.screenshot_count,
                CounterField::View => &mut content.view_count,
                CounterField::UniqueViewers => &mut content.unique_viewers_count,
            };
            *slot = (*slot + delta).max(0);
        }
        Ok(())
    }

    async fn add_unique_viewer(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        let first_time = self
            .0
            .viewers
            .lock()
            .unwrap()
            .entry(content_id)
            .or_default()
            .insert(user_id);

        if first_time {
            self.increment_counter(content_id, CounterField::UniqueViewers, 1)
                .await?;
        }
        Ok(first_time)
    }

    async fn copy_viewers(&self, from: Snowflake, to: Snowflake) -> RepoResult<u64> {
        let mut viewers = self.0.viewers.lock().unwrap();
        let source = viewers.get(&from).cloned().unwrap_or_default();
        let count = source.len() as u64;
        viewers.entry(to).or_default().extend(source);
        Ok(count)
    }

    async fn update_scores(&self, id: Snowflake, engagement: f64, viral: f64) -> RepoResult<()> {
        if let Some(content) = self.0.contents.lock().unwrap().get_mut(&id) {
            content.engagement_score = engagement;
            content.viral_score = viral;
        }
        Ok(())
    }

    async fn external_id_exists(&self, external_id: &str) -> RepoResult<bool> {
        Ok(self
            .0
            .contents
            .lock()
            .unwrap()
            .values()
            .any(|c| c.external_id.as_deref() == Some(external_id)))
    }

    async fn find_external(&self) -> RepoResult<Vec<Content>> {
        Ok(self
            .0
            .contents
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.external_id.is_some())
            .cloned()
            .collect())
    }
}

/// Channel repository over the shared store
#[derive(Clone)]
pub struct MemoryChannelRepository(pub Arc<MemoryStore>);

#[async_trait]
impl ChannelRepository for MemoryChannelRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        Ok(self.0.channels.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        let mut channels = self.0.channels.lock().unwrap();
        if channels.values().any(|c| c.name == channel.name) {
            return Err(DomainError::ValidationError(format!(
                "channel name already taken: {}",
                channel.name
            )));
        }
        channels.insert(channel.id, channel.clone());
        Ok(())
    }

    async fn list(&self) -> RepoResult<Vec<Channel>> {
        Ok(self.0.channels.lock().unwrap().values().cloned().collect())
    }

    async fn update_stats(
        &self,
        id: Snowflake,
        content_count: i64,
        total_views: i64,
        avg_engagement_rate: f64,
    ) -> RepoResult<()> {
        if let Some(channel) = self.0.channels.lock().unwrap().get_mut(&id) {
            channel.content_count = content_count;
            channel.total_views = total_views;
            channel.avg_engagement_rate = avg_engagement_rate;
        }
        Ok(())
    }
}

/// Interaction repository over the shared store
#[derive(Clone)]
pub struct MemoryInteractionRepository(pub Arc<MemoryStore>);

#[async_trait]
impl InteractionRepository for MemoryInteractionRepository {
    async fn toggle_reaction(&self, record: &InteractionRecord) -> RepoResult<ToggleOutcome> {
        if !record.interaction_type.is_toggle() {
            return Err(DomainError::InvalidInteraction(format!(
                "{} does not support toggling",
                record.interaction_type
            )));
        }

        let mut interactions = self.0.interactions.lock().unwrap();
        let existing = interactions.iter().position(|r| {
            r.content_id == record.content_id
                && r.user_id == record.user_id
                && r.interaction_type.is_toggle()
        });

        match existing {
            None => {
                interactions.push(record.clone());
                Ok(ToggleOutcome::Inserted)
            }
            Some(index) if interactions[index].interaction_type == record.interaction_type => {
                interactions.remove(index);
                Ok(ToggleOutcome::Removed)
            }
            Some(index) => {
                let previous = interactions[index].interaction_type;
                interactions[index].interaction_type = record.interaction_type;
                interactions[index].created_at = record.created_at;
                Ok(ToggleOutcome::Switched { previous })
            }
        }
    }

    async fn append(&self, record: &InteractionRecord) -> RepoResult<()> {
        self.0.interactions.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn find_reaction(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<InteractionRecord>> {
        Ok(self
            .0
            .interactions
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.content_id == content_id
                    && r.user_id == user_id
                    && r.interaction_type.is_toggle()
            })
            .cloned())
    }

    async fn find_view_since(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<InteractionRecord>> {
        Ok(self
            .0
            .interactions
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.content_id == content_id
                    && r.user_id == user_id
                    && r.interaction_type == InteractionType::View
                    && r.created_at >= since
            })
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn delete_by_content(&self, content_id: Snowflake) -> RepoResult<u64> {
        let mut interactions = self.0.interactions.lock().unwrap();
        let before = interactions.len();
        interactions.retain(|r| r.content_id != content_id);
        Ok((before - interactions.len()) as u64)
    }
}

/// Publisher that records every event instead of pushing to Redis
#[derive(Default)]
pub struct RecordingPublisher {
    pub reaction_updates: Mutex<Vec<ReactionUpdate>>,
    pub promotions: Mutex<Vec<ContentPromoted>>,
}

impl RecordingPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reaction_update_count(&self) -> usize {
        self.reaction_updates.lock().unwrap().len()
    }

    pub fn promotion_count(&self) -> usize {
        self.promotions.lock().unwrap().len()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish_reaction_update(&self, update: &ReactionUpdate) -> RepoResult<()> {
        self.reaction_updates.lock().unwrap().push(update.clone());
        Ok(())
    }

    async fn publish_content_promoted(&self, event: &ContentPromoted) -> RepoResult<()> {
        self.promotions.lock().unwrap().push(event.clone());
        Ok(())
    }
}
