//! Common test infrastructure for store integration tests.

use chrono::{DateTime, TimeZone, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tabula_core::RecordId;
use tabula_store::{Credentialed, Record, SqliteQuery, SqliteStore, StorePool};

/// Fixture record persisted by the integration tests.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Account {
    const TABLE: &'static str = "accounts";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["id", "email", "password", "display_name", "created_at"];

    fn key(&self) -> RecordId {
        RecordId::new(self.id)
    }

    fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id)
            .bind(&self.email)
            .bind(&self.password)
            .bind(&self.display_name)
            .bind(self.created_at)
    }
}

impl Credentialed for Account {
    const EMAIL_COLUMN: &'static str = "email";
    const PASSWORD_COLUMN: &'static str = "password";
}

/// In-memory database with the accounts table created and registered.
pub struct TestDatabase {
    pub store: SqliteStore,
    pool: Arc<StorePool>,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let pool = Arc::new(
            StorePool::in_memory()
                .await
                .expect("failed to open in-memory database"),
        );

        sqlx::query(
            "CREATE TABLE accounts (
                id INTEGER PRIMARY KEY,
                email TEXT NOT NULL,
                password TEXT NOT NULL,
                display_name TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(pool.inner())
        .await
        .expect("failed to create accounts table");

        let store = SqliteStore::new(Arc::clone(&pool));
        store
            .register::<Account>()
            .expect("failed to register Account");

        Self { store, pool }
    }

    pub fn pool(&self) -> Arc<StorePool> {
        Arc::clone(&self.pool)
    }
}

/// Builds an account keyed by `id`; password derives from the id.
pub fn account(id: i64, email: &str, display_name: &str) -> Account {
    Account {
        id,
        email: email.to_string(),
        password: format!("secret-{id}"),
        display_name: display_name.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}
