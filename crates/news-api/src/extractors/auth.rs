//! User identity extractor
//!
//! Identity is established by an upstream collaborator (gateway/auth proxy)
//! which forwards the authenticated user id in the `X-User-Id` header. The
//! core trusts this value as-is.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use news_core::Snowflake;

use crate::response::ApiError;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user forwarded by the identity collaborator
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: Snowflake,
}

impl CurrentUser {
    /// Create a new CurrentUser
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(ApiError::MissingAuth)?
            .to_str()
            .map_err(|_| ApiError::InvalidAuthFormat)?;

        let user_id = raw.parse::<Snowflake>().map_err(|_| {
            tracing::warn!(header = %raw, "Unparseable user id header");
            ApiError::InvalidAuthFormat
        })?;

        Ok(CurrentUser::new(user_id))
    }
}
