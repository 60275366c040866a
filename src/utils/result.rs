//! Unified Result Types

use super::AppError;

/// Application-level Result type
///
/// Used in service methods and application logic
pub type AppResult<T> = Result<T, AppError>;
