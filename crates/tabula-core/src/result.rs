//! Result type alias for tabula operations.

use crate::TabulaError;

/// A specialized `Result` for tabula operations.
pub type TabulaResult<T> = Result<T, TabulaError>;
