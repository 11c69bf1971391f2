//! Redis Pub/Sub publisher.
//!
//! Publishes events to Redis channels for distribution to connected clients.
//! All publishing is best-effort: callers treat failures as log-and-continue.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use news_core::{ContentPromoted, DomainError, EventPublisher, ReactionUpdate, RepoResult};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "REACTION_UPDATE", "CONTENT_PROMOTED")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish to multiple channels
    pub async fn publish_many(
        &self,
        channels: &[PubSubChannel],
        event: &PubSubEvent,
    ) -> RedisResult<u32> {
        let payload = event.to_json()?;
        let mut total_receivers = 0;
        let mut conn = self.pool.get().await?;

        for channel in channels {
            let receivers: u32 = conn.publish(&channel.name(), &payload).await?;
            total_receivers += receivers;
        }

        tracing::debug!(
            channels = channels.len(),
            event_type = %event.event_type,
            total_receivers = total_receivers,
            "Published event to multiple channels"
        );

        Ok(total_receivers)
    }
}

#[async_trait]
impl EventPublisher for Publisher {
    /// Fan updated counters out to clients watching the content item
    async fn publish_reaction_update(&self, update: &ReactionUpdate) -> RepoResult<()> {
        let event = PubSubEvent::new(
            "REACTION_UPDATE",
            serde_json::to_value(update).map_err(|e| DomainError::CacheError(e.to_string()))?,
        );
        self.publish(&PubSubChannel::content(update.content_id), &event)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;
        Ok(())
    }

    /// Announce a promotion on the owning channel's feed and the broadcast
    /// channel (promoted items show in all channels)
    async fn publish_content_promoted(&self, event: &ContentPromoted) -> RepoResult<()> {
        let payload = PubSubEvent::new(
            "CONTENT_PROMOTED",
            serde_json::to_value(event).map_err(|e| DomainError::CacheError(e.to_string()))?,
        );
        self.publish_many(
            &[
                PubSubChannel::channel(event.channel_id),
                PubSubChannel::broadcast(),
            ],
            &payload,
        )
        .await
        .map_err(|e| DomainError::CacheError(e.to_string()))?;
        Ok(())
    }
}
