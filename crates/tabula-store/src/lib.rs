//! # Tabula Store
//!
//! Generic record access over SQLite:
//!
//! ```text
//! Caller
//!   ↓  S: RecordAccess        (generic operation seam)
//! SqliteStore                 (one transaction per operation)
//!   ↓  Arc<SchemaRegistry>    (TypeId → cached TableSchema + SQL)
//!   ↓  Arc<StorePool>         (SQLx SQLite pool)
//! SQLite
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   record.rs    ← Record / Credentialed metadata traits
//!   schema.rs    ← TableSchema, SchemaRegistry
//!   access.rs    ← RecordAccess trait
//!   store.rs     ← SqliteStore
//!   pool.rs      ← StorePool
//! ```
//!
//! Record types are registered once; every operation then resolves its
//! cached schema, opens its own transaction, and commits or rolls back
//! before returning.

pub mod access;
pub mod pool;
pub mod record;
pub mod schema;
pub mod store;

pub use access::RecordAccess;
pub use pool::StorePool;
pub use record::{Credentialed, Record, SqliteQuery};
pub use schema::{SchemaRegistry, TableSchema};
pub use store::SqliteStore;
