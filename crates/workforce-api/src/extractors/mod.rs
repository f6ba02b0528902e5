//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod pagination;
pub mod path;

pub use auth::AuthUser;
pub use json::{ApiQuery, ValidatedJson};
pub use pagination::PaginationParams;
pub use path::IdPath;
