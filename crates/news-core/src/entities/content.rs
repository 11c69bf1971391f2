//! Content entity - a published news item
//!
//! A content item lives in one of two states: an ephemeral "Just In" flash
//! item with a short expiry window, or a durable "Headline" with a long one.
//! Promotion between the two is a copy-and-delete: the Just-In id is retired
//! and a fresh id (with a fresh `created_at`) represents the headline.

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Snowflake;

/// Content entity
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub title: String,
    pub message: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,

    /// Identifier assigned by the external ingestion source, if any
    pub external_id: Option<String>,
    /// Original article URL for externally ingested content
    pub source_url: Option<String>,

    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub screenshot_count: i64,
    pub view_count: i64,
    pub unique_viewers_count: i64,

    pub engagement_score: f64,
    pub viral_score: f64,

    pub is_just_in: bool,
    pub show_in_all_channels: bool,
    /// Only meaningful while `is_just_in` is set
    pub just_in_expires_at: Option<DateTime<Utc>>,
    /// Hard removal deadline regardless of state
    pub headline_expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub uploaded_at: DateTime<Utc>,
}

impl Content {
    /// Create a new Just-In item entering the short-lived flash window
    pub fn new_just_in(
        id: Snowflake,
        channel_id: Snowflake,
        title: String,
        message: String,
        just_in_window: Duration,
        headline_window: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            title,
            message,
            image_url: None,
            tags: Vec::new(),
            external_id: None,
            source_url: None,
            like_count: 0,
            dislike_count: 0,
            comment_count: 0,
            share_count: 0,
            screenshot_count: 0,
            view_count: 0,
            unique_viewers_count: 0,
            engagement_score: 0.0,
            viral_score: 0.0,
            is_just_in: true,
            show_in_all_channels: false,
            just_in_expires_at: Some(now + just_in_window),
            headline_expires_at: now + headline_window,
            created_at: now,
            uploaded_at: now,
        }
    }

    /// Create a content item entering directly at Headline state
    /// (the authored, non-flash creation path)
    pub fn new_headline(
        id: Snowflake,
        channel_id: Snowflake,
        title: String,
        message: String,
        headline_window: Duration,
    ) -> Self {
        Self {
            is_just_in: false,
            just_in_expires_at: None,
            ..Self::new_just_in(id, channel_id, title, message, Duration::zero(), headline_window)
        }
    }

    /// Whether the Just-In window has elapsed (eligible for promotion)
    pub fn just_in_window_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.is_just_in
            && self
                .just_in_expires_at
                .is_some_and(|expires| expires <= now)
    }

    /// Whether the item has reached its hard removal deadline
    pub fn headline_expired(&self, now: DateTime<Utc>) -> bool {
        self.headline_expires_at <= now
    }

    /// Build the Headline copy of a Just-In item.
    ///
    /// All fields carry over except identity and age: the copy gets the given
    /// fresh id and `created_at = now`, which restarts the viral-score clock.
    pub fn promote(&self, new_id: Snowflake, now: DateTime<Utc>) -> Content {
        Content {
            id: new_id,
            is_just_in: false,
            show_in_all_channels: true,
            just_in_expires_at: None,
            created_at: now,
            ..self.clone()
        }
    }

    /// Sum of all engagement-bearing counters (everything except raw views)
    pub fn interaction_total(&self) -> i64 {
        self.like_count
            + self.dislike_count
            + self.comment_count
            + self.share_count
            + self.screenshot_count
    }

    /// Current value of one counter
    pub fn counter(&self, field: CounterField) -> i64 {
        match field {
            CounterField::Like => self.like_count,
            CounterField::Dislike => self.dislike_count,
            CounterField::Comment => self.comment_count,
            CounterField::Share => self.share_count,
            CounterField::Screenshot => self.screenshot_count,
            CounterField::View => self.view_count,
            CounterField::UniqueViewers => self.unique_viewers_count,
        }
    }
}

/// Enumerated counter columns on a content item.
///
/// Interaction handling maps each interaction type onto exactly one of these;
/// there is no free-form field access anywhere in the mutation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterField {
    Like,
    Dislike,
    Comment,
    Share,
    Screenshot,
    View,
    UniqueViewers,
}

impl CounterField {
    /// Column name in the content store
    pub const fn column(self) -> &'static str {
        match self {
            Self::Like => "like_count",
            Self::Dislike => "dislike_count",
            Self::Comment => "comment_count",
            Self::Share => "share_count",
            Self::Screenshot => "screenshot_count",
            Self::View => "view_count",
            Self::UniqueViewers => "unique_viewers_count",
        }
    }
}
