//! # Invoice Builder Desktop Library
//!
//! Configures and runs the Tauri app.
//!
//! ## Module Organization
//! ```text
//! invoice_desktop_lib/
//! ├── lib.rs          ◄─── You are here (Tauri setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── invoice.rs  ◄─── The editing session (Arc<Mutex<Session>>)
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── export.rs   ◄─── Export gate
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── invoice.rs  ◄─── Row and field edits, reset
//! │   ├── settings.rs ◄─── Theme preference
//! │   ├── export.rs   ◄─── PDF export and printing
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tauri::Manager;
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use invoice_core::{Command, Session};
use invoice_db::{Database, DbConfig};
use state::{ConfigState, DbState, ExportState, InvoiceState, SystemEnvironment};

/// File name of the settings database inside the app data directory.
pub const DATABASE_FILE: &str = "invoice.db";

/// Log directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info,invoice=debug,sqlx=warn";

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, RUST_LOG overrides            │
/// │                                                                         │
/// │  2. Load Configuration                                                  │
/// │     • INVOICE_CURRENCY_SYMBOL, INVOICE_EXPORT_DIR                       │
/// │                                                                         │
/// │  3. Connect to Database                                                 │
/// │     • INVOICE_DB_PATH or <data dir>/invoice.db, migrations applied      │
/// │     • Restore the saved theme                                           │
/// │                                                                         │
/// │  4. Start the Session                                                   │
/// │     • Fresh invoice (today, due +15 days, random INV-xxxx)              │
/// │     • One default row                                                   │
/// │                                                                         │
/// │  5. Register commands and launch the window                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() {
    init_tracing();

    info!("Starting Invoice Builder");

    tauri::Builder::default()
        .setup(|app| {
            let config = ConfigState::from_env();
            info!(
                currency = %config.currency_symbol,
                export_dir = %config.export_dir.display(),
                "Configuration loaded"
            );

            let db_path = get_database_path(app)?;
            info!(?db_path, "Database path determined");

            let db = tauri::async_runtime::block_on(async {
                Database::new(DbConfig::new(db_path)).await
            })?;
            info!("Database connected and migrations applied");

            let theme = tauri::async_runtime::block_on(db.settings().get_theme())?;
            info!(%theme, "Theme restored");

            let env = SystemEnvironment;
            let mut session = Session::new(&env, config.currency_format());
            session.dispatch(Command::AddRow, &env)?;

            app.manage(InvoiceState::new(session));
            app.manage(DbState::new(db));
            app.manage(config);
            app.manage(ExportState::new());

            info!("State initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Invoice commands
            commands::invoice::get_invoice,
            commands::invoice::add_item,
            commands::invoice::remove_item,
            commands::invoice::edit_item,
            commands::invoice::edit_meta,
            commands::invoice::clear_all,
            // Settings commands
            commands::settings::get_theme,
            commands::settings::set_theme,
            commands::settings::toggle_theme,
            // Export commands
            commands::export::export_pdf,
            commands::export::print_invoice,
            // Config commands
            commands::config::get_config,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=invoice=trace` - Show trace for invoice crates only
/// - Default: INFO, DEBUG for invoice crates
fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    log_subscriber(log_filter(directives.as_deref())).init();
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// The filter alone decides what is emitted.
fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.invoice-builder.invoice-builder/invoice.db`
/// - **Windows**: `%APPDATA%\invoice-builder\invoice-builder\data\invoice.db`
/// - **Linux**: `~/.local/share/invoice-builder/invoice.db`
///
/// ## Development Override
/// Set `INVOICE_DB_PATH` to use a custom path.
fn get_database_path(_app: &tauri::App) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("INVOICE_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "invoice-builder", "invoice-builder")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DATABASE_FILE))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{enabled, Level};

    fn with_filter(directives: Option<&str>, check: impl FnOnce()) {
        tracing::subscriber::with_default(log_subscriber(log_filter(directives)), check);
    }

    #[test]
    fn test_default_filter() {
        with_filter(None, || {
            assert!(enabled!(target: "invoice_db::pool", Level::DEBUG));
            assert!(!enabled!(target: "invoice_db::pool", Level::TRACE));
            assert!(enabled!(target: "sqlx::query", Level::WARN));
            assert!(!enabled!(target: "sqlx::query", Level::DEBUG));
        });
    }

    #[test]
    fn test_rust_log_overrides_default() {
        with_filter(Some("error"), || {
            assert!(!enabled!(target: "invoice_db::pool", Level::DEBUG));
            assert!(!enabled!(target: "sqlx::query", Level::WARN));
            assert!(enabled!(target: "sqlx::query", Level::ERROR));
        });
        with_filter(Some("sqlx=debug"), || {
            assert!(enabled!(target: "sqlx::query", Level::DEBUG));
        });
    }

    #[test]
    fn test_unparsable_rust_log_falls_back() {
        with_filter(Some("invoice=loud"), || {
            assert!(enabled!(target: "invoice_db::pool", Level::DEBUG));
        });
    }
}
