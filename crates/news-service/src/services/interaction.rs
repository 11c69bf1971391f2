//! Interaction service
//!
//! Records user interactions against the ledger and applies the resulting
//! counter deltas. Like/dislike toggle; views deduplicate on a rolling
//! 24-hour window; comment/share/screenshot always append. Every mutation
//! recomputes the scores synchronously and fans the new counters out to
//! connected clients best-effort.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use news_core::entities::{ActiveButton, InteractionRecord, InteractionType};
use news_core::events::ReactionUpdate;
use news_core::traits::ToggleOutcome;
use news_core::{scoring, Content, DomainError, Snowflake};

use crate::dto::{ReactionSummaryResponse, RecordInteractionRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Rolling window within which repeat views by the same user do not count
const VIEW_DEDUP_WINDOW_HOURS: i64 = 24;

/// Interaction service
pub struct InteractionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InteractionService<'a> {
    /// Create a new InteractionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record an interaction and return the updated counters and scores
    #[instrument(skip(self, request))]
    pub async fn record_interaction(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
        request: RecordInteractionRequest,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let interaction_type = request
            .interaction_type
            .parse::<InteractionType>()
            .map_err(|e| ServiceError::Domain(DomainError::InvalidInteraction(e.0)))?;

        // Content must exist before touching the ledger
        self.ctx
            .content_repo()
            .find_by_id(content_id)
            .await?
            .ok_or(DomainError::ContentNotFound(content_id))?;

        let mut record = InteractionRecord::new(
            self.ctx.generate_id(),
            user_id,
            content_id,
            interaction_type,
        );
        record.duration_secs = request.duration_secs;
        record.device = request.device;
        record.platform = request.platform;

        let (mutated, active_button) = match interaction_type {
            InteractionType::Like | InteractionType::Dislike => {
                self.apply_toggle(&record).await?
            }
            InteractionType::View => self.apply_view(record).await?,
            InteractionType::Comment | InteractionType::Share | InteractionType::Screenshot => {
                self.apply_append(record).await?
            }
        };

        // Re-read the counters the increments produced; scores always derive
        // from the current stored counters, never from local arithmetic
        let mut content = self
            .ctx
            .content_repo()
            .find_by_id(content_id)
            .await?
            .ok_or(DomainError::ContentNotFound(content_id))?;

        if mutated {
            self.recompute_scores(&mut content).await?;

            let update = ReactionUpdate::from_content(&content, active_button);
            if let Err(e) = self.ctx.publisher().publish_reaction_update(&update).await {
                // Fan-out is best-effort; the request already succeeded
                warn!(content_id = %content_id, error = %e, "reaction fan-out failed");
            }

            info!(
                content_id = %content_id,
                user_id = %user_id,
                interaction_type = %interaction_type,
                "Interaction recorded"
            );
        }

        Ok(ReactionSummaryResponse::new(&content, active_button))
    }

    /// Current counters, scores, and the caller's active reaction
    #[instrument(skip(self))]
    pub async fn get_reaction_summary(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let content = self
            .ctx
            .content_repo()
            .find_by_id(content_id)
            .await?
            .ok_or(DomainError::ContentNotFound(content_id))?;

        let active_button = self.current_button(content_id, user_id).await?;
        Ok(ReactionSummaryResponse::new(&content, active_button))
    }

    /// Toggle a like/dislike and apply the resulting counter deltas
    async fn apply_toggle(
        &self,
        record: &InteractionRecord,
    ) -> ServiceResult<(bool, ActiveButton)> {
        let ty = record.interaction_type;
        let outcome = self.ctx.interaction_repo().toggle_reaction(record).await?;

        let repo = self.ctx.content_repo();
        let active_button = match outcome {
            ToggleOutcome::Inserted => {
                repo.increment_counter(record.content_id, ty.counter(), 1)
                    .await?;
                ActiveButton::from(Some(ty))
            }
            ToggleOutcome::Removed => {
                repo.increment_counter(record.content_id, ty.counter(), -1)
                    .await?;
                ActiveButton::None
            }
            ToggleOutcome::Switched { previous } => {
                // Both deltas must land; a failure between them is healed by
                // the floor-at-zero increments and the next recompute
                repo.increment_counter(record.content_id, previous.counter(), -1)
                    .await?;
                repo.increment_counter(record.content_id, ty.counter(), 1)
                    .await?;
                ActiveButton::from(Some(ty))
            }
        };

        Ok((true, active_button))
    }

    /// Record a view unless the same user viewed within the dedup window
    async fn apply_view(&self, record: InteractionRecord) -> ServiceResult<(bool, ActiveButton)> {
        let content_id = record.content_id;
        let user_id = record.user_id;
        let window_start = Utc::now() - Duration::hours(VIEW_DEDUP_WINDOW_HOURS);

        let recent = self
            .ctx
            .interaction_repo()
            .find_view_since(content_id, user_id, window_start)
            .await?;

        let active_button = self.current_button(content_id, user_id).await?;

        if recent.is_some() {
            // Within the window: no record, no delta
            return Ok((false, active_button));
        }

        self.ctx.interaction_repo().append(&record).await?;
        self.ctx
            .content_repo()
            .increment_counter(content_id, InteractionType::View.counter(), 1)
            .await?;

        // First-ever view by this user also counts them as a unique viewer
        self.ctx
            .content_repo()
            .add_unique_viewer(content_id, user_id)
            .await?;

        Ok((true, active_button))
    }

    /// Append-only types: write the record and bump the counter
    async fn apply_append(
        &self,
        record: InteractionRecord,
    ) -> ServiceResult<(bool, ActiveButton)> {
        let content_id = record.content_id;
        let user_id = record.user_id;
        let counter = record.interaction_type.counter();

        self.ctx.interaction_repo().append(&record).await?;
        self.ctx
            .content_repo()
            .increment_counter(content_id, counter, 1)
            .await?;

        let active_button = self.current_button(content_id, user_id).await?;
        Ok((true, active_button))
    }

    /// Recompute both scores from current counters and persist them
    async fn recompute_scores(&self, content: &mut Content) -> ServiceResult<()> {
        let engagement = scoring::engagement_score(content);
        let viral = scoring::viral_score(content, Utc::now());

        self.ctx
            .content_repo()
            .update_scores(content.id, engagement, viral)
            .await?;

        content.engagement_score = engagement;
        content.viral_score = viral;
        Ok(())
    }

    async fn current_button(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ActiveButton> {
        let reaction = self
            .ctx
            .interaction_repo()
            .find_reaction(content_id, user_id)
            .await?;
        Ok(ActiveButton::from(
            reaction.map(|record| record.interaction_type),
        ))
    }
}
