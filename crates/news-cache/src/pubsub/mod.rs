//! Redis Pub/Sub module.
//!
//! Publishes interaction and lifecycle events for distribution to connected
//! clients. The subscribing side (gateway) is an external collaborator.

mod channels;
mod publisher;

pub use channels::{
    PubSubChannel, BROADCAST_CHANNEL, CHANNEL_PREFIX, CONTENT_CHANNEL_PREFIX,
};
pub use publisher::{PubSubEvent, Publisher};
