//! # news-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! Counter mutations are single-statement atomic increments floored at zero;
//! reaction toggles run in a row-locking transaction backed by a partial
//! unique index, so concurrent toggles for the same (user, content) pair
//! serialize instead of double-inserting.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgChannelRepository, PgContentRepository, PgInteractionRepository};
