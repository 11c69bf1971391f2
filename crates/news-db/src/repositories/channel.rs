//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use news_core::entities::Channel;
use news_core::traits::{ChannelRepository, RepoResult};
use news_core::value_objects::Snowflake;

use crate::models::ChannelModel;

use super::error::{map_db_error, map_unique_violation};

const CHANNEL_COLUMNS: &str = "id, name, picture_url, description, tags, subscriber_count, \
     content_count, total_views, avg_engagement_rate, is_external, created_at";

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        let sql = format!("SELECT {CHANNEL_COLUMNS} FROM channels WHERE id = $1");
        let result = sqlx::query_as::<_, ChannelModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self, channel))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO channels (
                id, name, picture_url, description, tags, subscriber_count,
                content_count, total_views, avg_engagement_rate, is_external, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(channel.id.into_inner())
        .bind(&channel.name)
        .bind(channel.picture_url.as_deref())
        .bind(channel.description.as_deref())
        .bind(&channel.tags)
        .bind(channel.subscriber_count)
        .bind(channel.content_count)
        .bind(channel.total_views)
        .bind(channel.avg_engagement_rate)
        .bind(channel.is_external)
        .bind(channel.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                news_core::DomainError::ValidationError(format!(
                    "channel name already taken: {}",
                    channel.name
                ))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Channel>> {
        let sql = format!("SELECT {CHANNEL_COLUMNS} FROM channels ORDER BY name");
        let results = sqlx::query_as::<_, ChannelModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_stats(
        &self,
        id: Snowflake,
        content_count: i64,
        total_views: i64,
        avg_engagement_rate: f64,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE channels
            SET content_count = $2, total_views = $3, avg_engagement_rate = $4
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(content_count)
        .bind(total_views)
        .bind(avg_engagement_rate)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
