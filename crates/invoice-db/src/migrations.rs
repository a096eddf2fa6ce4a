//! # Database Migrations
//!
//! Embedded SQL migrations, applied at startup.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql` (e.g., `002_recent_clients.sql`)
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations. Safe to call repeatedly.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!(migrations = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MIGRATOR;
    use crate::pool::{Database, DbConfig};

    async fn applied(db: &Database) -> usize {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        count as usize
    }

    #[tokio::test]
    async fn test_all_migrations_applied() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(!MIGRATOR.migrations.is_empty());
        assert_eq!(applied(&db).await, MIGRATOR.migrations.len());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.run_migrations().await.unwrap();
        assert_eq!(applied(&db).await, MIGRATOR.migrations.len());
    }
}
