//! # State Module
//!
//! Application state for the Tauri desktop app, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Tauri Runtime                              │   │
//! │  │  app.manage(invoice_state);   app.manage(db_state);             │   │
//! │  │  app.manage(config_state);    app.manage(export_state);         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌──────────────┬─────────┴────────┬──────────────────┐             │
//! │     ▼              ▼                  ▼                  ▼              │
//! │  ┌────────────┐ ┌────────────┐ ┌──────────────┐ ┌──────────────┐       │
//! │  │InvoiceState│ │  DbState   │ │ ConfigState  │ │ ExportState  │       │
//! │  │ Arc<Mutex< │ │  Database  │ │ currency     │ │ Arc<         │       │
//! │  │  Session>> │ │  (pool)    │ │ export dir   │ │  ExportGate> │       │
//! │  └────────────┘ └────────────┘ └──────────────┘ └──────────────┘       │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • InvoiceState: every command holds the mutex until it is done        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • ExportState: atomic flag, one export at a time                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod export;
mod invoice;

pub use config::ConfigState;
pub use db::DbState;
pub use export::ExportState;
pub use invoice::{InvoiceState, SystemEnvironment};
