//! # Settings Repository
//!
//! Key-value user preferences.
//!
//! ## Theme Restore
//! ```text
//! startup ──► get_theme() ──► row 'dark'   ──► Theme::Dark
//!                        └──► no row       ──► Theme::Light
//!                        └──► row 'blue'   ──► Theme::Light (warned)
//!
//! toggle  ──► set_theme(t) ──► upsert ('theme', t)
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use invoice_core::Theme;

/// Key under which the theme preference is stored.
pub const THEME_KEY: &str = "theme";

/// Repository for the `settings` table.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Reads a raw setting.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes a raw setting, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, value = %value, "Saving setting");

        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The saved theme, or light when nothing usable is stored.
    pub async fn get_theme(&self) -> DbResult<Theme> {
        let Some(raw) = self.get(THEME_KEY).await? else {
            return Ok(Theme::default());
        };

        match raw.parse::<Theme>() {
            Ok(theme) => Ok(theme),
            Err(e) => {
                warn!(value = %raw, error = %e, "Ignoring stored theme");
                Ok(Theme::default())
            }
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> DbResult<()> {
        self.set(THEME_KEY, theme.as_str()).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
