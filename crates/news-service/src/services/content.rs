//! Content service
//!
//! Authoring and ingestion paths. Authored content may enter directly at
//! Headline state; externally ingested articles always enter at Just-In and
//! are rejected up front when their derived external id is already present.

use tracing::{info, instrument};
use validator::Validate;

use news_core::{dedup, Channel, Content, DomainError, Snowflake};

use crate::dto::{
    ChannelResponse, ContentResponse, CreateChannelRequest, CreateContentRequest,
    IngestContentRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Content service
pub struct ContentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContentService<'a> {
    /// Create a new ContentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a content item by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake) -> ServiceResult<ContentResponse> {
        let content = self
            .ctx
            .content_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ContentNotFound(id))?;

        Ok(ContentResponse::from(&content))
    }

    /// Create authored content
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateContentRequest) -> ServiceResult<ContentResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let channel_id = parse_id(&request.channel_id)?;
        self.require_channel(channel_id).await?;

        let lifecycle = self.ctx.lifecycle();
        let id = self.ctx.generate_id();

        let mut content = if request.just_in {
            Content::new_just_in(
                id,
                channel_id,
                request.title,
                request.message,
                lifecycle.just_in_window(),
                lifecycle.headline_window(),
            )
        } else {
            Content::new_headline(
                id,
                channel_id,
                request.title,
                request.message,
                lifecycle.headline_window(),
            )
        };
        content.image_url = request.image_url;
        content.tags = request.tags;

        self.ctx.content_repo().create(&content).await?;

        info!(content_id = %id, channel_id = %channel_id, just_in = content.is_just_in, "Content created");

        Ok(ContentResponse::from(&content))
    }

    /// Ingest an externally sourced article.
    ///
    /// Derives a deterministic external id from the normalized source URL and
    /// title slug; re-ingesting the same article (tracking decoration and
    /// all) is rejected as a duplicate before anything is written.
    #[instrument(skip(self, request))]
    pub async fn ingest(&self, request: IngestContentRequest) -> ServiceResult<ContentResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let channel_id = parse_id(&request.channel_id)?;
        self.require_channel(channel_id).await?;

        let external_id = dedup::derive_external_id(&request.source_url, &request.title);
        if self
            .ctx
            .content_repo()
            .external_id_exists(&external_id)
            .await?
        {
            return Err(DomainError::DuplicateContent(external_id).into());
        }

        let lifecycle = self.ctx.lifecycle();
        let id = self.ctx.generate_id();

        let mut content = Content::new_just_in(
            id,
            channel_id,
            request.title,
            request.message,
            lifecycle.just_in_window(),
            lifecycle.headline_window(),
        );
        content.external_id = Some(external_id);
        content.source_url = Some(request.source_url);
        content.image_url = request.image_url;
        content.tags = request.tags;

        // A racing identical ingest can slip past the lookup; the periodic
        // duplicate cleanup removes the loser
        self.ctx.content_repo().create(&content).await?;

        info!(content_id = %id, channel_id = %channel_id, "External content ingested");

        Ok(ContentResponse::from(&content))
    }

    /// Create a publisher channel
    #[instrument(skip(self, request))]
    pub async fn create_channel(
        &self,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let id = self.ctx.generate_id();
        let mut channel = if request.is_external {
            Channel::new_external(id, request.name)
        } else {
            Channel::new(id, request.name)
        };
        channel.description = request.description;
        channel.picture_url = request.picture_url;
        channel.tags = request.tags;

        self.ctx.channel_repo().create(&channel).await?;

        info!(channel_id = %id, name = %channel.name, "Channel created");

        Ok(ChannelResponse::from(&channel))
    }

    /// Get a channel by id
    #[instrument(skip(self))]
    pub async fn get_channel(&self, id: Snowflake) -> ServiceResult<ChannelResponse> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ChannelNotFound(id))?;

        Ok(ChannelResponse::from(&channel))
    }

    async fn require_channel(&self, channel_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;
        Ok(())
    }
}

fn parse_id(raw: &str) -> ServiceResult<Snowflake> {
    raw.parse::<Snowflake>()
        .map_err(|_| ServiceError::validation(format!("invalid id: {raw}")))
}
