//! Channel stats aggregator
//!
//! Recomputes per-channel rollups (content count, total views, mean
//! engagement) from a read-then-aggregate snapshot. Safe to run concurrently
//! with interaction mutations; the result is an eventually consistent
//! snapshot, not a transactional one.

use tracing::{info, instrument, warn};

use news_core::{DomainError, Snowflake};

use crate::dto::ChannelStatsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Channel stats service
pub struct ChannelStatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelStatsService<'a> {
    /// Create a new ChannelStatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Recompute and persist the rollups for one channel
    #[instrument(skip(self))]
    pub async fn recompute(&self, channel_id: Snowflake) -> ServiceResult<ChannelStatsResponse> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        let contents = self.ctx.content_repo().find_by_channel(channel_id).await?;

        let content_count = contents.len() as i64;
        let total_views: i64 = contents.iter().map(|c| c.view_count).sum();
        let avg_engagement_rate = if contents.is_empty() {
            0.0
        } else {
            contents.iter().map(|c| c.engagement_score).sum::<f64>() / contents.len() as f64
        };

        self.ctx
            .channel_repo()
            .update_stats(channel_id, content_count, total_views, avg_engagement_rate)
            .await?;

        info!(
            channel_id = %channel_id,
            content_count,
            avg_engagement_rate,
            "Channel stats recomputed"
        );

        Ok(ChannelStatsResponse {
            channel_id,
            content_count,
            total_views,
            avg_engagement_rate,
        })
    }

    /// Recompute every channel, logging and continuing past failures
    #[instrument(skip(self))]
    pub async fn recompute_all(&self) -> ServiceResult<u64> {
        let channels = self.ctx.channel_repo().list().await?;
        let mut updated = 0u64;

        for channel in channels {
            match self.recompute(channel.id).await {
                Ok(_) => updated += 1,
                Err(e) => {
                    warn!(channel_id = %channel.id, error = %e, "stats recompute failed, skipping");
                }
            }
        }

        Ok(updated)
    }
}
