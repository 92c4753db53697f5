//! Error types shared by every layer of tabula.

use thiserror::Error;

/// Unified error type for the tabula access layer.
///
/// Callers can tell a missing row (`NotFound`), a rejected request
/// (`Conflict`, `UnknownColumn`, `Unregistered`, `Validation`), and a
/// store-level failure (`Database`) apart by variant instead of sharing
/// one collapsed "empty" value.
#[derive(Error, Debug)]
pub enum TabulaError {
    /// A keyed row was required but absent.
    #[error("no row in {table} with key {id}")]
    NotFound { table: &'static str, id: String },

    /// Unique or primary-key constraint violation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A filter referenced a column the registered schema does not have.
    #[error("unknown column {column} on {table}")]
    UnknownColumn { table: &'static str, column: String },

    /// An operation was attempted on a type that was never registered.
    #[error("type not registered: {0}")]
    Unregistered(&'static str),

    /// Schema metadata rejected at registration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Any other failure reported by the store.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration load or validation failure.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invariant breakage inside the layer itself.
    #[error("internal error: {0}")]
    Internal(String),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TabulaError {
    /// Creates a not-found error for a keyed row.
    #[must_use]
    pub fn not_found<T: ToString>(table: &'static str, id: T) -> Self {
        Self::NotFound {
            table,
            id: id.to_string(),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// True when the row simply was not there, as opposed to the store
    /// misbehaving.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for failures where retrying against the store could help.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TabulaError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                table: "row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // SQLite extended result codes for unique / primary-key
                // constraint violations.
                if let Some(code) = db_err.code() {
                    if code == "2067" || code == "1555" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}
