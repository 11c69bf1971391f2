//! Lifecycle service
//!
//! Drives the Just-In -> Headline -> Expired state machine. Promotion is a
//! copy-and-delete: the Headline copy gets a fresh id and a fresh
//! `created_at` (restarting the viral-score clock), then the Just-In row is
//! deleted. The sweep runs periodically and is also invokable on demand;
//! read paths stay correct during sweep lag by treating an elapsed Just-In
//! window as Headline state.

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use news_core::events::ContentPromoted;
use news_core::traits::JustInQuery;
use news_core::{Content, DomainError, Snowflake};

use crate::dto::{ContentResponse, SweepReport};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Lifecycle service
pub struct LifecycleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LifecycleService<'a> {
    /// Create a new LifecycleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One sweep pass: promote every Just-In item whose window elapsed, then
    /// remove items past their hard expiry. Idempotent; per-item failures are
    /// logged and left for the next pass.
    #[instrument(skip(self))]
    pub async fn run_sweep(&self) -> ServiceResult<SweepReport> {
        let now = Utc::now();
        let batch_size = self.ctx.lifecycle().sweep_batch_size;
        let mut report = SweepReport::default();

        loop {
            let expired = self
                .ctx
                .content_repo()
                .find_expired_just_in(now, batch_size)
                .await?;
            if expired.is_empty() {
                break;
            }
            let batch_len = expired.len() as i64;

            for content in expired {
                match self.promote(&content, now).await {
                    Ok(()) => report.promoted += 1,
                    Err(e) => {
                        report.failed += 1;
                        warn!(
                            content_id = %content.id,
                            error = %e,
                            "promotion failed, leaving for next sweep"
                        );
                    }
                }
            }

            // A short batch means the scan is drained; anything left over
            // failed and would spin this loop forever
            if batch_len < batch_size || report.failed > 0 {
                break;
            }
        }

        report.expired_removed = self
            .ctx
            .content_repo()
            .delete_expired_headlines(now)
            .await?;

        if report.promoted > 0 || report.expired_removed > 0 || report.failed > 0 {
            info!(
                promoted = report.promoted,
                expired_removed = report.expired_removed,
                failed = report.failed,
                "Lifecycle sweep completed"
            );
        }

        Ok(report)
    }

    /// List the Just-In feed
    #[instrument(skip(self))]
    pub async fn list_just_in(
        &self,
        exclude_expired: bool,
        preferred_channel: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<Vec<ContentResponse>> {
        let contents = self
            .ctx
            .content_repo()
            .list_just_in(JustInQuery {
                include_expired: !exclude_expired,
                preferred_channel,
                limit,
            })
            .await?;

        Ok(contents.iter().map(ContentResponse::from).collect())
    }

    /// List the Headline feed
    #[instrument(skip(self))]
    pub async fn list_headline(&self, limit: i64) -> ServiceResult<Vec<ContentResponse>> {
        let contents = self.ctx.content_repo().list_headline(limit).await?;
        Ok(contents.iter().map(ContentResponse::from).collect())
    }

    /// Copy-and-delete promotion of one Just-In item.
    ///
    /// The copy is created before the original is deleted, so a failure in
    /// between leaves both rows; the next sweep retries the delete side via
    /// the still-expired original. Unique-viewer memberships move with the
    /// item so viewers are never double-counted on the new id.
    async fn promote(&self, content: &Content, now: DateTime<Utc>) -> ServiceResult<()> {
        let new_id = self.ctx.generate_id();
        let promoted = content.promote(new_id, now);

        self.ctx.content_repo().create(&promoted).await?;
        self.ctx.content_repo().copy_viewers(content.id, new_id).await?;

        let deleted = self.ctx.content_repo().delete(content.id).await?;
        if !deleted {
            // Another sweeper got here first; drop our copy to keep exactly one
            self.ctx.content_repo().delete(new_id).await?;
            return Err(DomainError::InternalError(format!(
                "content {} already promoted by a concurrent sweep",
                content.id
            ))
            .into());
        }

        let event = ContentPromoted {
            content_id: new_id,
            previous_id: content.id,
            channel_id: content.channel_id,
        };
        if let Err(e) = self.ctx.publisher().publish_content_promoted(&event).await {
            warn!(content_id = %new_id, error = %e, "promotion fan-out failed");
        }

        info!(
            previous_id = %content.id,
            content_id = %new_id,
            channel_id = %content.channel_id,
            "Just-In item promoted to headline"
        );

        Ok(())
    }
}
