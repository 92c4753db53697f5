//! The record access seam.

use crate::{Credentialed, Record};
use async_trait::async_trait;
use tabula_core::{Page, PageRequest, RecordId, TabulaResult};

/// Generic record access over a relational store.
///
/// Every operation runs in its own transaction, committed or rolled back
/// before the call returns. Implementations hold no per-call state, so one
/// instance can be shared across concurrent callers.
///
/// The methods are generic over the record type, so this trait is not
/// object-safe; consume it as a generic bound rather than through `dyn`.
#[async_trait]
pub trait RecordAccess: Send + Sync {
    /// Persists a new record. Fails with `Conflict` when the key is taken.
    async fn insert<T: Record>(&self, record: &T) -> TabulaResult<()>;

    /// Rewrites the row matching the record's key. Fails with `NotFound`
    /// when no such row exists.
    async fn update<T: Record>(&self, record: &T) -> TabulaResult<()>;

    /// Removes the row with the given key. Returns `false` when there was
    /// nothing to remove.
    async fn delete<T: Record>(&self, id: RecordId) -> TabulaResult<bool>;

    /// True when a row with the given key exists.
    async fn exists<T: Record>(&self, id: RecordId) -> TabulaResult<bool>;

    /// Fetches the row with the given key.
    async fn find_by_id<T: Record>(&self, id: RecordId) -> TabulaResult<Option<T>>;

    /// One page of all rows, in ascending key order, together with the
    /// table's total row count.
    async fn find_all<T: Record>(&self, page: PageRequest) -> TabulaResult<Page<T>>;

    /// One page of the rows whose `column` matches `pattern` under SQL
    /// `LIKE` semantics, in ascending key order.
    ///
    /// The pattern is bound verbatim: `%` wildcards, and escaping them,
    /// are the caller's responsibility. The column must be one of the
    /// registered columns.
    async fn find_like<T: Record>(
        &self,
        column: &str,
        pattern: &str,
        page: PageRequest,
    ) -> TabulaResult<Page<T>>;

    /// Total row count for the record's table.
    async fn count<T: Record>(&self) -> TabulaResult<u64>;

    /// The row whose email and password columns both equal the given
    /// values; the lowest-keyed row wins a tie.
    ///
    /// This is a verbatim equality match against stored column values,
    /// not credential verification. Nothing is hashed here.
    async fn find_by_credentials<T: Credentialed>(
        &self,
        email: &str,
        password: &str,
    ) -> TabulaResult<Option<T>>;

    /// The row whose email column equals the given value; the
    /// lowest-keyed row wins a tie.
    async fn find_by_email<T: Credentialed>(&self, email: &str) -> TabulaResult<Option<T>>;
}
