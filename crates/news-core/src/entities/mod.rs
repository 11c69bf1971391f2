//! Domain entities

mod channel;
mod content;
mod interaction;

pub use channel::Channel;
pub use content::{Content, CounterField};
pub use interaction::{ActiveButton, InteractionRecord, InteractionType, UnknownInteractionType};
