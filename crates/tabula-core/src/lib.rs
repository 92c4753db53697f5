//! # Tabula Core
//!
//! Shared foundation for the tabula access layer: the error taxonomy,
//! result alias, typed record ids, pagination types, and the tracing
//! bootstrap. Everything here is storage-agnostic; SQLx only appears
//! behind the `sqlx` feature for error conversion.

pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;

pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use telemetry::*;
