//! Request extractors

mod auth;
mod pagination;
mod path;

pub use auth::CurrentUser;
pub use pagination::Pagination;
pub use path::parse_snowflake;
