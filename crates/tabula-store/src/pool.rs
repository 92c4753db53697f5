//! Database connection pool management.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tabula_config::DatabaseConfig;
use tabula_core::{TabulaError, TabulaResult};
use tracing::{info, warn};

/// SQLite pool wrapper.
///
/// Operations borrow connections from here one transaction at a time;
/// the pool's acquire timeout is the only timeout the layer imposes.
pub struct StorePool {
    pool: SqlitePool,
}

impl StorePool {
    /// Opens a pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> TabulaResult<Self> {
        info!("connecting to sqlite database...");

        let pool = SqlitePoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_secs)))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("failed to connect to database: {}", e);
                TabulaError::Database(format!("failed to connect: {e}"))
            })?;

        info!("sqlite connection pool established");
        Ok(Self { pool })
    }

    /// Opens an in-memory database.
    ///
    /// Pinned to a single connection: every sqlite `:memory:` connection
    /// is a distinct database.
    pub async fn in_memory() -> TabulaResult<Self> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| TabulaError::Database(format!("failed to open in-memory database: {e}")))?;

        Ok(Self { pool })
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks that the database answers queries.
    pub async fn health_check(&self) -> TabulaResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| TabulaError::Database(format!("health check failed: {e}")))?;
        Ok(())
    }

    /// Closes the pool, waiting for checked-out connections.
    pub async fn close(&self) {
        info!("closing database connection pool...");
        self.pool.close().await;
        info!("database connection pool closed");
    }
}

impl std::ops::Deref for StorePool {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

impl std::fmt::Debug for StorePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
