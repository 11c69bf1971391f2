//! Ports - interfaces the domain requires from infrastructure

mod publisher;
mod repositories;

pub use publisher::EventPublisher;
pub use repositories::{
    ChannelRepository, ContentRepository, InteractionRepository, JustInQuery, RepoResult,
    ToggleOutcome,
};
