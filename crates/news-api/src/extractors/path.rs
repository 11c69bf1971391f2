//! Path parameter helpers

use news_core::Snowflake;

use crate::response::ApiError;

/// Parse a Snowflake id from a raw path segment
pub fn parse_snowflake(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}
