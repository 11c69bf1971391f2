//! PostgreSQL repository implementations

mod channel;
mod content;
mod error;
mod interaction;

pub use channel::PgChannelRepository;
pub use content::PgContentRepository;
pub use interaction::PgInteractionRepository;
