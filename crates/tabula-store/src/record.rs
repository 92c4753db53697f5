//! Record metadata traits.
//!
//! A [`Record`] describes how one struct maps onto one table: static
//! table/key/column metadata, row decoding via SQLx `FromRow`, and
//! column-value binding in declared order. The store derives every SQL
//! statement it needs from this metadata, so callers never pass table or
//! column names at runtime except for the filter column of a `LIKE`
//! lookup (which is validated against `COLUMNS`).

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};
use tabula_core::RecordId;

/// The query type record values bind their columns onto.
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// A persistable record type.
///
/// `COLUMNS` is the authoritative column order: [`Record::bind`] must
/// append one value per column in exactly that order, and `FromRow` must
/// accept rows selected in that order. `KEY` names the numeric surrogate
/// key column and must appear in `COLUMNS`.
///
/// ```ignore
/// #[derive(sqlx::FromRow)]
/// struct Account {
///     id: i64,
///     email: String,
/// }
///
/// impl Record for Account {
///     const TABLE: &'static str = "accounts";
///     const KEY: &'static str = "id";
///     const COLUMNS: &'static [&'static str] = &["id", "email"];
///
///     fn key(&self) -> RecordId {
///         RecordId::new(self.id)
///     }
///
///     fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
///         query.bind(self.id).bind(&self.email)
///     }
/// }
/// ```
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    /// Table this record persists into.
    const TABLE: &'static str;

    /// Primary-key column name.
    const KEY: &'static str;

    /// All column names, in binding order. Must contain `KEY`.
    const COLUMNS: &'static [&'static str];

    /// The record's key value.
    fn key(&self) -> RecordId;

    /// Appends this record's column values to `query`, one bind per
    /// entry of `COLUMNS`, in order.
    fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// A record carrying credential columns.
///
/// Enables the equality-based credential lookups. The lookups compare
/// stored column values verbatim; no hashing or verification happens at
/// this layer, so the stored password column must already contain
/// whatever representation the caller compares with.
pub trait Credentialed: Record {
    /// Column holding the login identifier.
    const EMAIL_COLUMN: &'static str = "email";

    /// Column holding the stored credential.
    const PASSWORD_COLUMN: &'static str = "password";
}
