//! Result type alias for template linting operations

use crate::error::CurlyError;

/// Standard Result type for template linting operations
pub type Result<T> = std::result::Result<T, CurlyError>;
