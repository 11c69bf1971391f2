//! Service context - dependency container for services
//!
//! Holds the repositories, event publisher, id generator, and lifecycle
//! tunables every service needs. Constructed once at startup and passed in
//! explicitly; there is no ambient global state.

use std::sync::Arc;

use news_common::LifecycleConfig;
use news_core::traits::{
    ChannelRepository, ContentRepository, EventPublisher, InteractionRepository,
};
use news_core::{Snowflake, SnowflakeGenerator};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    content_repo: Arc<dyn ContentRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    interaction_repo: Arc<dyn InteractionRepository>,
    publisher: Arc<dyn EventPublisher>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    lifecycle: LifecycleConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        content_repo: Arc<dyn ContentRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        interaction_repo: Arc<dyn InteractionRepository>,
        publisher: Arc<dyn EventPublisher>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        lifecycle: LifecycleConfig,
    ) -> Self {
        Self {
            content_repo,
            channel_repo,
            interaction_repo,
            publisher,
            snowflake_generator,
            lifecycle,
        }
    }

    /// Get the content repository
    pub fn content_repo(&self) -> &dyn ContentRepository {
        self.content_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the interaction repository
    pub fn interaction_repo(&self) -> &dyn InteractionRepository {
        self.interaction_repo.as_ref()
    }

    /// Get the real-time event publisher
    pub fn publisher(&self) -> &dyn EventPublisher {
        self.publisher.as_ref()
    }

    /// Get the lifecycle tunables
    pub fn lifecycle(&self) -> &LifecycleConfig {
        &self.lifecycle
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    content_repo: Option<Arc<dyn ContentRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    interaction_repo: Option<Arc<dyn InteractionRepository>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    lifecycle: Option<LifecycleConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_repo(mut self, repo: Arc<dyn ContentRepository>) -> Self {
        self.content_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn interaction_repo(mut self, repo: Arc<dyn InteractionRepository>) -> Self {
        self.interaction_repo = Some(repo);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.content_repo
                .ok_or_else(|| ServiceError::validation("content_repo is required"))?,
            self.channel_repo
                .ok_or_else(|| ServiceError::validation("channel_repo is required"))?,
            self.interaction_repo
                .ok_or_else(|| ServiceError::validation("interaction_repo is required"))?,
            self.publisher
                .ok_or_else(|| ServiceError::validation("publisher is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.lifecycle.unwrap_or_default(),
        ))
    }
}
