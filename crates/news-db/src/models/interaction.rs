//! Interaction ledger database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the interactions table
///
/// `interaction_type` is stored as text and parsed back through the
/// enumerated domain type; an unparseable row is surfaced as a database
/// error rather than silently skipped.
#[derive(Debug, Clone, FromRow)]
pub struct InteractionModel {
    pub id: i64,
    pub user_id: i64,
    pub content_id: i64,
    pub interaction_type: String,
    pub created_at: DateTime<Utc>,
    pub duration_secs: Option<i32>,
    pub device: Option<String>,
    pub platform: Option<String>,
}
