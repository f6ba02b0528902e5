//! Convenience result type alias for Workforce.

use crate::error::AppError;

/// A specialized `Result` type for Workforce operations.
pub type AppResult<T> = Result<T, AppError>;
