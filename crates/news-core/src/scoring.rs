//! Engagement and virality scoring
//!
//! Pure functions over a content item's counters and age. Callers persist the
//! results back onto the item immediately after every counter mutation; a
//! stale stored score is a bug, not eventual consistency.

use chrono::{DateTime, Utc};

use crate::entities::Content;

/// Weight of the per-hour engagement rate in the viral score
pub const ENGAGEMENT_RATE_WEIGHT: f64 = 0.7;
/// Weight of the per-hour view growth rate in the viral score
pub const VIEW_GROWTH_WEIGHT: f64 = 0.3;

/// Interactions per unique viewer, scaled to a percentage-like number.
///
/// Zero when nobody has viewed the item yet, so fresh content never divides
/// by zero and never scores above content people actually saw.
pub fn engagement_score(content: &Content) -> f64 {
    if content.unique_viewers_count == 0 {
        return 0.0;
    }
    content.interaction_total() as f64 / content.unique_viewers_count as f64 * 100.0
}

/// Weighted blend of per-hour engagement rate and per-hour view growth.
///
/// Age is floored at one hour so brand-new content does not blow up the
/// per-hour rates.
pub fn viral_score(content: &Content, now: DateTime<Utc>) -> f64 {
    let hours = hours_since_creation(content.created_at, now);
    let engagement_rate = engagement_score(content) / hours;
    let view_growth_rate = content.view_count as f64 / hours;
    engagement_rate * ENGAGEMENT_RATE_WEIGHT + view_growth_rate * VIEW_GROWTH_WEIGHT
}

fn hours_since_creation(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = (now - created_at).num_seconds() as f64 / 3600.0;
    hours.max(1.0)
}
