//! # Database State
//!
//! Wraps the `Database` connection for use in Tauri commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! #[tauri::command]
//! async fn get_theme(db: State<'_, DbState>) -> Result<Theme, ApiError> {
//!     Ok(db.settings().get_theme().await?)
//! }
//! ```

use invoice_db::{Database, SettingsRepository};

#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    pub fn settings(&self) -> SettingsRepository {
        self.db.settings()
    }
}
