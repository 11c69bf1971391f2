//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Content not found: {0}")]
    ContentNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    // =========================================================================
    // Invalid State Errors
    // =========================================================================
    #[error("Invalid interaction: {0}")]
    InvalidInteraction(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Duplicate content: {0}")]
    DuplicateContent(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    /// Store operation failed or a lost-race retry was exhausted
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContentNotFound(_) => "UNKNOWN_CONTENT",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::InvalidInteraction(_) => "INVALID_INTERACTION",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::DuplicateContent(_) => "DUPLICATE_CONTENT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ContentNotFound(_) | Self::ChannelNotFound(_))
    }

    /// Check if this is a rejected-request error (bad input or state)
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidInteraction(_) | Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateContent(_))
    }
}
