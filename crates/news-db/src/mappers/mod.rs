//! Entity <-> model mappers

mod channel;
mod content;
mod interaction;

pub use interaction::try_interaction_from_model;
