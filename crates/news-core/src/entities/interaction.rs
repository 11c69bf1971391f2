//! Interaction ledger entities
//!
//! One record per user interaction with a content item. Like/dislike are
//! toggle types (a user holds a like XOR a dislike XOR neither); the rest are
//! append-only, with views deduplicated on a rolling 24-hour window for
//! counter purposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::CounterField;
use crate::value_objects::Snowflake;

/// Kind of interaction a user performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Like,
    Dislike,
    Comment,
    Share,
    Screenshot,
}

impl InteractionType {
    /// Toggle types: a second identical action undoes the first
    pub const fn is_toggle(self) -> bool {
        matches!(self, Self::Like | Self::Dislike)
    }

    /// The counter this interaction type feeds
    pub const fn counter(self) -> CounterField {
        match self {
            Self::View => CounterField::View,
            Self::Like => CounterField::Like,
            Self::Dislike => CounterField::Dislike,
            Self::Comment => CounterField::Comment,
            Self::Share => CounterField::Share,
            Self::Screenshot => CounterField::Screenshot,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Comment => "comment",
            Self::Share => "share",
            Self::Screenshot => "screenshot",
        }
    }

    /// The opposite toggle type, for like/dislike only
    pub const fn opposite(self) -> Option<Self> {
        match self {
            Self::Like => Some(Self::Dislike),
            Self::Dislike => Some(Self::Like),
            _ => None,
        }
    }
}

impl std::str::FromStr for InteractionType {
    type Err = UnknownInteractionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            "comment" => Ok(Self::Comment),
            "share" => Ok(Self::Share),
            "screenshot" => Ok(Self::Screenshot),
            other => Err(UnknownInteractionType(other.to_string())),
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized interaction type string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interaction type: {0}")]
pub struct UnknownInteractionType(pub String);

/// Which reaction button the user currently holds on a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveButton {
    Like,
    Dislike,
    #[default]
    None,
}

impl From<Option<InteractionType>> for ActiveButton {
    fn from(value: Option<InteractionType>) -> Self {
        match value {
            Some(InteractionType::Like) => Self::Like,
            Some(InteractionType::Dislike) => Self::Dislike,
            _ => Self::None,
        }
    }
}

/// One user's interaction with one content item
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub content_id: Snowflake,
    pub interaction_type: InteractionType,
    pub created_at: DateTime<Utc>,
    /// Seconds spent, for view interactions that report it
    pub duration_secs: Option<i32>,
    pub device: Option<String>,
    pub platform: Option<String>,
}

impl InteractionRecord {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        content_id: Snowflake,
        interaction_type: InteractionType,
    ) -> Self {
        Self {
            id,
            user_id,
            content_id,
            interaction_type,
            created_at: Utc::now(),
            duration_secs: None,
            device: None,
            platform: None,
        }
    }
}
