use eduverse_domain::shared::DomainError;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

use crate::config::StoreTimeouts;
use crate::persistence::StoreResultExt;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(db_path: &Path, timeouts: StoreTimeouts) -> Result<Self, DomainError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::StoreUnavailable(format!("Failed to create DB directory: {}", e))
            })?;
        }

        // WAL with a deferred transaction whose first statement writes: the
        // write lock is taken before any read, and waiters use busy_timeout
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(timeouts.busy);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeouts.acquire)
            .connect_with(options)
            .await
            .map_store_error("Open database")?;

        log::info!("Database opened at {}", db_path.display());

        Ok(Self { pool })
    }

    /// Private in-memory database on a single connection.
    pub async fn in_memory() -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_store_error("Parse in-memory URL")?;

        // Every connection to :memory: is a separate database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_store_error("Open in-memory database")?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::StoreUnavailable(format!("Run migrations: {}", e)))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for checked-out connections and close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        log::debug!("Database pool closed");
    }
}
