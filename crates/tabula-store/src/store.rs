//! SQLite implementation of [`RecordAccess`].
//!
//! Each operation begins a transaction on a pooled connection, executes,
//! and commits. Error propagation with `?` drops the transaction guard,
//! which rolls it back, so every code path leaves exactly one commit or
//! one rollback behind. Reads run inside a transaction too: a page and
//! its total row count come from one snapshot.

use crate::{Credentialed, Record, RecordAccess, SchemaRegistry, StorePool, TableSchema};
use async_trait::async_trait;
use std::sync::Arc;
use tabula_core::{Page, PageRequest, RecordId, TabulaError, TabulaResult};
use tracing::debug;

/// SQLite record store.
///
/// Holds only the pool and the schema registry; all per-operation state
/// lives on the stack of the call, so a single instance (or clones of it)
/// can serve concurrent callers.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<StorePool>,
    registry: Arc<SchemaRegistry>,
}

impl SqliteStore {
    /// Creates a store with an empty registry.
    #[must_use]
    pub fn new(pool: Arc<StorePool>) -> Self {
        Self::with_registry(pool, Arc::new(SchemaRegistry::new()))
    }

    /// Creates a store sharing an existing registry.
    #[must_use]
    pub fn with_registry(pool: Arc<StorePool>, registry: Arc<SchemaRegistry>) -> Self {
        Self { pool, registry }
    }

    /// Registers a record type with this store's registry.
    pub fn register<T: Record>(&self) -> TabulaResult<()> {
        self.registry.register::<T>()
    }

    /// Returns the store's connection pool.
    #[must_use]
    pub fn pool(&self) -> &StorePool {
        &self.pool
    }

    fn schema<T: Record>(&self) -> TabulaResult<Arc<TableSchema>> {
        self.registry.get::<T>()
    }
}

#[async_trait]
impl RecordAccess for SqliteStore {
    async fn insert<T: Record>(&self, record: &T) -> TabulaResult<()> {
        let schema = self.schema::<T>()?;
        debug!(table = schema.table, id = %record.key(), "inserting record");

        let mut tx = self.pool.inner().begin().await?;
        record
            .bind(sqlx::query(schema.insert_sql()))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update<T: Record>(&self, record: &T) -> TabulaResult<()> {
        let schema = self.schema::<T>()?;
        let id = record.key();
        debug!(table = schema.table, %id, "updating record");

        let mut tx = self.pool.inner().begin().await?;
        let result = record
            .bind(sqlx::query(schema.update_sql()))
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(TabulaError::not_found(schema.table, id));
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete<T: Record>(&self, id: RecordId) -> TabulaResult<bool> {
        let schema = self.schema::<T>()?;
        debug!(table = schema.table, %id, "deleting record");

        let mut tx = self.pool.inner().begin().await?;
        let result = sqlx::query(schema.delete_sql())
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists<T: Record>(&self, id: RecordId) -> TabulaResult<bool> {
        let schema = self.schema::<T>()?;

        let mut tx = self.pool.inner().begin().await?;
        let found: Option<i32> = sqlx::query_scalar(schema.exists_sql())
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(found.is_some())
    }

    async fn find_by_id<T: Record>(&self, id: RecordId) -> TabulaResult<Option<T>> {
        let schema = self.schema::<T>()?;
        debug!(table = schema.table, %id, "fetching record by key");

        let mut tx = self.pool.inner().begin().await?;
        let row = sqlx::query_as::<_, T>(schema.select_by_key_sql())
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn find_all<T: Record>(&self, page: PageRequest) -> TabulaResult<Page<T>> {
        let schema = self.schema::<T>()?;
        debug!(
            table = schema.table,
            page = page.page,
            size = page.size,
            "listing records"
        );

        let mut tx = self.pool.inner().begin().await?;
        let total: i64 = sqlx::query_scalar(schema.count_sql())
            .fetch_one(&mut *tx)
            .await?;
        let rows = sqlx::query_as::<_, T>(schema.select_page_sql())
            .bind(i64::from(page.limit()))
            .bind(page.offset() as i64)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Page::new(rows, page, total as u64))
    }

    async fn find_like<T: Record>(
        &self,
        column: &str,
        pattern: &str,
        page: PageRequest,
    ) -> TabulaResult<Page<T>> {
        let schema = self.schema::<T>()?;
        if !schema.has_column(column) {
            return Err(TabulaError::UnknownColumn {
                table: schema.table,
                column: column.to_string(),
            });
        }
        debug!(table = schema.table, column, "listing records by pattern");

        let page_sql = schema.like_page_sql(column);
        let count_sql = schema.like_count_sql(column);

        let mut tx = self.pool.inner().begin().await?;
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(pattern)
            .fetch_one(&mut *tx)
            .await?;
        let rows = sqlx::query_as::<_, T>(&page_sql)
            .bind(pattern)
            .bind(i64::from(page.limit()))
            .bind(page.offset() as i64)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Page::new(rows, page, total as u64))
    }

    async fn count<T: Record>(&self) -> TabulaResult<u64> {
        let schema = self.schema::<T>()?;

        let mut tx = self.pool.inner().begin().await?;
        let total: i64 = sqlx::query_scalar(schema.count_sql())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(total as u64)
    }

    async fn find_by_credentials<T: Credentialed>(
        &self,
        email: &str,
        password: &str,
    ) -> TabulaResult<Option<T>> {
        let schema = self.schema::<T>()?;
        for column in [T::EMAIL_COLUMN, T::PASSWORD_COLUMN] {
            if !schema.has_column(column) {
                return Err(TabulaError::UnknownColumn {
                    table: schema.table,
                    column: column.to_string(),
                });
            }
        }
        debug!(table = schema.table, "credential lookup");

        let sql = schema.unique_match_sql(&[T::EMAIL_COLUMN, T::PASSWORD_COLUMN]);

        let mut tx = self.pool.inner().begin().await?;
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(email)
            .bind(password)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn find_by_email<T: Credentialed>(&self, email: &str) -> TabulaResult<Option<T>> {
        let schema = self.schema::<T>()?;
        if !schema.has_column(T::EMAIL_COLUMN) {
            return Err(TabulaError::UnknownColumn {
                table: schema.table,
                column: T::EMAIL_COLUMN.to_string(),
            });
        }
        debug!(table = schema.table, "email lookup");

        let sql = schema.unique_match_sql(&[T::EMAIL_COLUMN]);

        let mut tx = self.pool.inner().begin().await?;
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}
