//! # news-cache
//!
//! Redis layer: a managed connection pool and the pub/sub publisher used for
//! best-effort real-time fan-out of interaction counter updates.

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export pubsub types
pub use pubsub::{PubSubChannel, PubSubEvent, Publisher, BROADCAST_CHANNEL, CHANNEL_PREFIX,
    CONTENT_CHANNEL_PREFIX,
};
