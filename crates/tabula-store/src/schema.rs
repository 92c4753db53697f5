//! Table schemas and the type registry.
//!
//! [`SchemaRegistry`] resolves a record type to its [`TableSchema`] once,
//! validates the metadata, and caches the result together with the SQL
//! text for every fixed-shape statement. Table and column names are the
//! only strings interpolated into SQL, so they must pass identifier
//! validation at registration; all values travel as bound parameters.

use crate::Record;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tabula_core::{TabulaError, TabulaResult};
use tracing::debug;

/// Validated metadata and precomputed SQL for one record type.
#[derive(Debug)]
pub struct TableSchema {
    /// Table name.
    pub table: &'static str,
    /// Primary-key column.
    pub key: &'static str,
    /// All columns, in binding order.
    pub columns: &'static [&'static str],
    select_list: String,
    select_by_key: String,
    select_page: String,
    insert: String,
    update: String,
    delete: String,
    count: String,
    exists: String,
}

impl TableSchema {
    pub(crate) fn build<T: Record>() -> TabulaResult<Self> {
        let table = T::TABLE;
        let key = T::KEY;
        let columns = T::COLUMNS;

        validate_identifier(table)?;
        validate_identifier(key)?;
        if columns.is_empty() {
            return Err(TabulaError::validation(format!(
                "{table}: column list is empty"
            )));
        }
        let mut seen = HashSet::new();
        for column in columns {
            validate_identifier(column)?;
            if !seen.insert(*column) {
                return Err(TabulaError::validation(format!(
                    "{table}: duplicate column {column}"
                )));
            }
        }
        if !columns.contains(&key) {
            return Err(TabulaError::validation(format!(
                "{table}: key column {key} missing from column list"
            )));
        }

        let select_list = columns.join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");
        let assignments = columns
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            table,
            key,
            columns,
            select_by_key: format!("SELECT {select_list} FROM {table} WHERE {key} = ?"),
            select_page: format!(
                "SELECT {select_list} FROM {table} ORDER BY {key} LIMIT ? OFFSET ?"
            ),
            insert: format!("INSERT INTO {table} ({select_list}) VALUES ({placeholders})"),
            update: format!("UPDATE {table} SET {assignments} WHERE {key} = ?"),
            delete: format!("DELETE FROM {table} WHERE {key} = ?"),
            count: format!("SELECT COUNT(*) FROM {table}"),
            exists: format!("SELECT 1 FROM {table} WHERE {key} = ? LIMIT 1"),
            select_list,
        })
    }

    /// True when `name` is one of this schema's columns.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| *c == name)
    }

    pub(crate) fn select_by_key_sql(&self) -> &str {
        &self.select_by_key
    }

    pub(crate) fn select_page_sql(&self) -> &str {
        &self.select_page
    }

    pub(crate) fn insert_sql(&self) -> &str {
        &self.insert
    }

    pub(crate) fn update_sql(&self) -> &str {
        &self.update
    }

    pub(crate) fn delete_sql(&self) -> &str {
        &self.delete
    }

    pub(crate) fn count_sql(&self) -> &str {
        &self.count
    }

    pub(crate) fn exists_sql(&self) -> &str {
        &self.exists
    }

    /// Page select filtered by a `LIKE` on one column. The caller must
    /// have checked the column with [`TableSchema::has_column`].
    pub(crate) fn like_page_sql(&self, column: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {column} LIKE ? ORDER BY {} LIMIT ? OFFSET ?",
            self.select_list, self.table, self.key
        )
    }

    /// Matching-row count for the same `LIKE` filter.
    pub(crate) fn like_count_sql(&self, column: &str) -> String {
        format!("SELECT COUNT(*) FROM {} WHERE {column} LIKE ?", self.table)
    }

    /// Single-row select with an equality predicate per given column.
    /// Ties resolve to the lowest key.
    pub(crate) fn unique_match_sql(&self, match_columns: &[&str]) -> String {
        let predicates = match_columns
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(
            "SELECT {} FROM {} WHERE {predicates} ORDER BY {} LIMIT 1",
            self.select_list, self.table, self.key
        )
    }
}

fn validate_identifier(name: &str) -> TabulaResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(TabulaError::validation(format!(
            "invalid SQL identifier: {name:?}"
        )))
    }
}

/// Cache of registered record schemas, keyed by `TypeId`.
///
/// Registration is explicit and idempotent; operations on a type that was
/// never registered fail with [`TabulaError::Unregistered`].
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, Arc<TableSchema>>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and caches the schema for `T`.
    pub fn register<T: Record>(&self) -> TabulaResult<()> {
        let mut schemas = self.schemas.write();
        if schemas.contains_key(&TypeId::of::<T>()) {
            return Ok(());
        }

        let schema = TableSchema::build::<T>()?;
        debug!(table = schema.table, "registered record type");
        schemas.insert(TypeId::of::<T>(), Arc::new(schema));
        Ok(())
    }

    /// Returns the cached schema for `T`.
    pub fn get<T: Record>(&self) -> TabulaResult<Arc<TableSchema>> {
        self.schemas
            .read()
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or(TabulaError::Unregistered(std::any::type_name::<T>()))
    }

    /// True when `T` has been registered.
    #[must_use]
    pub fn is_registered<T: Record>(&self) -> bool {
        self.schemas.read().contains_key(&TypeId::of::<T>())
    }
}
