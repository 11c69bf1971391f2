//! PostgreSQL implementation of ContentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use news_core::entities::{Content, CounterField};
use news_core::traits::{ContentRepository, JustInQuery, RepoResult};
use news_core::value_objects::Snowflake;

use crate::models::ContentModel;

use super::error::map_db_error;

const CONTENT_COLUMNS: &str = "id, channel_id, title, message, image_url, tags, external_id, \
     source_url, like_count, dislike_count, comment_count, share_count, screenshot_count, \
     view_count, unique_viewers_count, engagement_score, viral_score, is_just_in, \
     show_in_all_channels, just_in_expires_at, headline_expires_at, created_at, uploaded_at";

/// PostgreSQL implementation of ContentRepository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    /// Create a new PgContentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Content>> {
        let sql = format!("SELECT {CONTENT_COLUMNS} FROM contents WHERE id = $1");
        let result = sqlx::query_as::<_, ContentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Content::from))
    }

    #[instrument(skip(self, content))]
    async fn create(&self, content: &Content) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contents (
                id, channel_id, title, message, image_url, tags, external_id, source_url,
                like_count, dislike_count, comment_count, share_count, screenshot_count,
                view_count, unique_viewers_count, engagement_score, viral_score,
                is_just_in, show_in_all_channels, just_in_expires_at, headline_expires_at,
                created_at, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23)
            "#,
        )
        .bind(content.id.into_inner())
        .bind(content.channel_id.into_inner())
        .bind(&content.title)
        .bind(&content.message)
        .bind(content.image_url.as_deref())
        .bind(&content.tags)
        .bind(content.external_id.as_deref())
        .bind(content.source_url.as_deref())
        .bind(content.like_count)
        .bind(content.dislike_count)
        .bind(content.comment_count)
        .bind(content.share_count)
        .bind(content.screenshot_count)
        .bind(content.view_count)
        .bind(content.unique_viewers_count)
        .bind(content.engagement_score)
        .bind(content.viral_score)
        .bind(content.is_just_in)
        .bind(content.show_in_all_channels)
        .bind(content.just_in_expires_at)
        .bind(content.headline_expires_at)
        .bind(content.created_at)
        .bind(content.uploaded_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_just_in(&self, query: JustInQuery) -> RepoResult<Vec<Content>> {
        let limit = query.limit.clamp(1, 100);
        let preferred = query.preferred_channel.map(Snowflake::into_inner);

        // COALESCE keeps the preferred-channel sort stable when no channel
        // preference was supplied
        let sql = if query.include_expired {
            format!(
                "SELECT {CONTENT_COLUMNS} FROM contents \
                 WHERE is_just_in AND headline_expires_at > NOW() \
                 ORDER BY COALESCE(channel_id = $1, FALSE) DESC, created_at DESC \
                 LIMIT $2"
            )
        } else {
            format!(
                "SELECT {CONTENT_COLUMNS} FROM contents \
                 WHERE is_just_in AND just_in_expires_at > NOW() \
                   AND headline_expires_at > NOW() \
                 ORDER BY COALESCE(channel_id = $1, FALSE) DESC, created_at DESC \
                 LIMIT $2"
            )
        };

        let results = sqlx::query_as::<_, ContentModel>(&sql)
            .bind(preferred)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Content::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_headline(&self, limit: i64) -> RepoResult<Vec<Content>> {
        let limit = limit.clamp(1, 100);

        // A Just-In item past its window counts as Headline even before the
        // sweep has promoted it
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents \
             WHERE (NOT is_just_in OR just_in_expires_at <= NOW()) \
               AND headline_expires_at > NOW() \
             ORDER BY created_at DESC \
             LIMIT $1"
        );

        let results = sqlx::query_as::<_, ContentModel>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Content::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<Content>> {
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE channel_id = $1 ORDER BY created_at DESC"
        );

        let results = sqlx::query_as::<_, ContentModel>(&sql)
            .bind(channel_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Content::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_expired_just_in(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Content>> {
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents \
             WHERE is_just_in AND just_in_expires_at <= $1 \
             ORDER BY just_in_expires_at ASC \
             LIMIT $2"
        );

        let results = sqlx::query_as::<_, ContentModel>(&sql)
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Content::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_expired_headlines(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM contents WHERE headline_expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn increment_counter(
        &self,
        id: Snowflake,
        field: CounterField,
        delta: i64,
    ) -> RepoResult<()> {
        // Column name comes from the enumerated mapping, never from input
        let column = field.column();
        let sql =
            format!("UPDATE contents SET {column} = GREATEST({column} + $2, 0) WHERE id = $1");

        sqlx::query(&sql)
            .bind(id.into_inner())
            .bind(delta)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_unique_viewer(
        &self,
        content_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO content_viewers (content_id, user_id, first_viewed_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (content_id, user_id) DO NOTHING
            "#,
        )
        .bind(content_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected()
            > 0;

        if inserted {
            sqlx::query(
                "UPDATE contents SET unique_viewers_count = unique_viewers_count + 1 WHERE id = $1",
            )
            .bind(content_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn copy_viewers(&self, from: Snowflake, to: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO content_viewers (content_id, user_id, first_viewed_at)
            SELECT $2, user_id, first_viewed_at FROM content_viewers WHERE content_id = $1
            ON CONFLICT (content_id, user_id) DO NOTHING
            "#,
        )
        .bind(from.into_inner())
        .bind(to.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn update_scores(&self, id: Snowflake, engagement: f64, viral: f64) -> RepoResult<()> {
        sqlx::query("UPDATE contents SET engagement_score = $2, viral_score = $3 WHERE id = $1")
            .bind(id.into_inner())
            .bind(engagement)
            .bind(viral)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn external_id_exists(&self, external_id: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM contents WHERE external_id = $1)",
        )
        .bind(external_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn find_external(&self) -> RepoResult<Vec<Content>> {
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents \
             WHERE external_id IS NOT NULL \
             ORDER BY created_at DESC"
        );

        let results = sqlx::query_as::<_, ContentModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Content::from).collect())
    }
}
