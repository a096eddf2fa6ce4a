//! # Invoice Builder Desktop Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoice Builder Desktop                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Tauri WebView                               │  │
//! │  │  • Company / client form     • Line items table                  │  │
//! │  │  • Totals summary            • Live preview                      │  │
//! │  │                              │                                   │  │
//! │  │                     invoke('command')                            │  │
//! │  └──────────────────────────────┼───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  lib.rs ─────► Logging, database, state, command registration   │  │
//! │  │  commands/ ──► add_item, edit_item, clear_all, export_pdf       │  │
//! │  │  state/ ─────► InvoiceState, DbState, ConfigState, ExportState  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  invoice.db (theme preference)      <download dir>/INV-xxxx.pdf  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// Prevents an additional console window on Windows in release
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

fn main() {
    invoice_desktop_lib::run();
}
