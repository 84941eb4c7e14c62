//! Result type aliases for Emporium.

use crate::EmporiumError;

/// A specialized `Result` type for Emporium operations.
pub type EmporiumResult<T> = Result<T, EmporiumError>;
