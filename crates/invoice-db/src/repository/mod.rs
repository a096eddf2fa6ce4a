//! # Repository Module
//!
//! Database repository implementations.
//!
//! ```text
//! Tauri Command
//!      │  db.settings().set_theme(Theme::Dark)
//!      ▼
//! SettingsRepository
//! ├── get(&self, key)
//! ├── set(&self, key, value)
//! ├── get_theme(&self)
//! └── set_theme(&self, theme)
//!      │  SQL Query
//!      ▼
//! SQLite Database
//! ```
//!
//! ## Available Repositories
//!
//! - [`settings::SettingsRepository`] - Key-value user preferences

pub mod settings;
