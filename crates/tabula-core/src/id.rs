//! Typed key wrapper for persisted records.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A strongly-typed numeric surrogate key.
///
/// Records are keyed by a single `i64` column; wrapping it keeps ids from
/// being confused with counts, offsets, or other plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Wraps a raw key value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let id = RecordId::new(7);
        assert_eq!(id.into_inner(), 7);
        assert_eq!(i64::from(id), 7);
        assert_eq!(RecordId::from(7), id);
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordId::new(42).to_string(), "42");
    }

    #[test]
    fn test_ordering() {
        assert!(RecordId::new(1) < RecordId::new(2));
    }
}
