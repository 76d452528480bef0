//! Result type alias for lintstack operations

use crate::error::LintstackError;

/// Standard Result type for lintstack operations
pub type Result<T> = std::result::Result<T, LintstackError>;
