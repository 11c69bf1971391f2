//! PostgreSQL implementation of InteractionRepository
//!
//! The reaction toggle is the one store primitive that must serialize
//! concurrent writers: it runs in a transaction that row-locks the existing
//! reaction, and the fresh-insert race two concurrent first-time toggles can
//! still hit is closed by the partial unique index on reaction rows. A lost
//! race is retried once with a re-read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{instrument, warn};

use news_core::entities::{InteractionRecord, InteractionType};
use news_core::traits::{InteractionRepository, RepoResult, ToggleOutcome};
use news_core::value_objects::Snowflake;
use news_core::DomainError;

use crate::mappers::try_interaction_from_model;
use crate::models::InteractionModel;

use super::error::{is_unique_violation, map_db_error};

const INTERACTION_COLUMNS: &str =
    "id, user_id, content_id, interaction_type, created_at, duration_secs, device, platform";

/// One pass of the toggle transaction
enum ToggleAttempt {
    Done(ToggleOutcome),
    /// Another writer inserted the reaction between our read and insert
    LostRace,
}

/// PostgreSQL implementation of InteractionRepository
#[derive(Clone)]
pub struct PgInteractionRepository {
    pool: PgPool,
}

impl PgInteractionRepository {
    /// Create a new PgInteractionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn try_toggle(&self, record: &InteractionRecord) -> RepoResult<ToggleAttempt> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let sql = format!(
            "SELECT {INTERACTION_COLUMNS} FROM interactions \
             WHERE content_id = $1 AND user_id = $2 \
               AND interaction_type IN ('like', 'dislike') \
             FOR UPDATE"
        );
        let existing = sqlx::query_as::<_, InteractionModel>(&sql)
            .bind(record.content_id.into_inner())
            .bind(record.user_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let outcome = match existing {
            None => {
                let insert = sqlx::query(
                    r#"
                    INSERT INTO interactions
                        (id, user_id, content_id, interaction_type, created_at,
                         duration_secs, device, platform)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(record.id.into_inner())
                .bind(record.user_id.into_inner())
                .bind(record.content_id.into_inner())
                .bind(record.interaction_type.as_str())
                .bind(record.created_at)
                .bind(record.duration_secs)
                .bind(record.device.as_deref())
                .bind(record.platform.as_deref())
                .execute(&mut *tx)
                .await;

                match insert {
                    Ok(_) => ToggleOutcome::Inserted,
                    Err(e) if is_unique_violation(&e) => {
                        tx.rollback().await.ok();
                        return Ok(ToggleAttempt::LostRace);
                    }
                    Err(e) => return Err(map_db_error(e)),
                }
            }
            Some(row) if row.interaction_type == record.interaction_type.as_str() => {
                sqlx::query("DELETE FROM interactions WHERE id = $1")
                    .bind(row.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                ToggleOutcome::Removed
            }
            Some(row) => {
                let previous = try_interaction_from_model(row.clone())?.interaction_type;
                sqlx::query(
                    "UPDATE interactions SET interaction_type = $2, created_at = $3 WHERE id = $1",
                )
                .bind(row.id)
                .bind(record.interaction_type.as_str())
                .bind(record.created_at)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
                ToggleOutcome::Switched { previous }
            }
        };

        tx.commit().await.map_err(map_db_error)?;
        Ok(ToggleAttempt::Done(outcome))
    }
}

#[async_trait]
impl InteractionRepository for PgInteractionRepository {
    #[instrument(skip(self, record), fields(content_id = %record.content_id, user_id = %record.user_id))]
    async fn toggle_reaction(&self, record: &InteractionRecord) -> RepoResult<ToggleOutcome> {
        if !record.interaction_type.is_toggle() {
            return Err(DomainError::InvalidInteraction(format!(
                "{} does not support toggling",
                record.interaction_type
            )));
        }

        match self.try_toggle(record).await? {
            ToggleAttempt::Done(outcome) => return Ok(outcome),
            ToggleAttempt::LostRace => {
                warn!(
                    content_id = %record.content_id,
                    user_id = %record.user_id,
                    "reaction toggle lost insert race, retrying"
                );
            }
        }

        // One automatic retry with a fresh read
        match self.try_toggle(record).await? {
            ToggleAttempt::Done(outcome) => Ok(outcome),
            ToggleAttempt::LostRace => Err(DomainError::DatabaseError(
                "reaction toggle lost the insert race twice".to_string(),
            )),
        }
    }

    #[instrument(skip(self, record), fields(content_id = %record.content_id, interaction_type = %record.interaction_type))]
    async fn append(&self, record: &InteractionRecord) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO interactions
                (id, user_id, content_id, interaction_type, created_at,
                 duration_secs, device, platform)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id.into_inner())
        .bind(record.user_id.into_inner())
        .bind(record.content_id.into_inner())
        .bind(record.interaction_type.as_str())
        .bind(record.created_at)
        .bind(record.duration_secs)
        .bind(record.device.as_deref())
        .bind(record.platform.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_reaction(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<InteractionRecord>> {
        let sql = format!(
            "SELECT {INTERACTION_COLUMNS} FROM interactions \
             WHERE content_id = $1 AND user_id = $2 \
               AND interaction_type IN ('like', 'dislike')"
        );
        let result = sqlx::query_as::<_, InteractionModel>(&sql)
            .bind(content_id.into_inner())
            .bind(user_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(try_interaction_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn find_view_since(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<InteractionRecord>> {
        let sql = format!(
            "SELECT {INTERACTION_COLUMNS} FROM interactions \
             WHERE content_id = $1 AND user_id = $2 \
               AND interaction_type = $3 AND created_at >= $4 \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        let result = sqlx::query_as::<_, InteractionModel>(&sql)
            .bind(content_id.into_inner())
            .bind(user_id.into_inner())
            .bind(InteractionType::View.as_str())
            .bind(since)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(try_interaction_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_by_content(&self, content_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM interactions WHERE content_id = $1")
            .bind(content_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
