//! # Settings Store Pool
//!
//! Opens the SQLite file that holds user preferences.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(<data dir>/invoice.db)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config)  ──► WAL pool ──► embedded migrations           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.settings().get_theme()                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::settings::SettingsRepository;

/// Where the settings live and how many connections may touch them.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,

    /// A handful of writes per session: 2 is plenty.
    pub max_connections: u32,
}

impl DbConfig {
    /// A file-backed store, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 2,
        }
    }

    /// A private in-memory store. Each connection would see its own empty
    /// database, so the pool is pinned to one.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
        }
    }
}

/// Handle over the settings pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening settings store");

        let options = SqliteConnectOptions::from_str(&format!(
            "sqlite://{}?mode=rwc",
            config.database_path.display()
        ))
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_is_usable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(db.pool()).await.unwrap();
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn test_file_store_is_created() {
        let dir = std::env::temp_dir().join(format!("invoice-db-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("invoice.db");
        let _ = std::fs::remove_file(&path);

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.settings().set("k", "v").await.unwrap();
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_defaults() {
        assert_eq!(DbConfig::new("/tmp/invoice.db").max_connections, 2);
        assert_eq!(DbConfig::in_memory().max_connections, 1);
    }
}
