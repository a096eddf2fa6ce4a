//! # Tauri Commands Module
//!
//! All commands exposed to the frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── invoice.rs  ◄─── get_invoice, add_item, remove_item, edit_item,
//! │                    edit_meta, clear_all
//! ├── settings.rs ◄─── get_theme, set_theme, toggle_theme
//! ├── export.rs   ◄─── export_pdf, print_invoice
//! └── config.rs   ◄─── get_config
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend                                                               │
//! │  ─────────                                                              │
//! │  import { invoke } from '@tauri-apps/api/core';                         │
//! │                                                                         │
//! │  const view = await invoke('edit_item', {                               │
//! │    id: row.id, field: 'unitPrice', value: input.value                   │
//! │  });                                                                    │
//! │         │                                                               │
//! │         │ (IPC via WebView)                                             │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  #[tauri::command]                                                      │
//! │  fn edit_item(                                                          │
//! │      invoice: State<'_, InvoiceState>,  ◄── Injected by Tauri          │
//! │      id: u64, field: String, value: String,                             │
//! │  ) -> Result<InvoiceView, ApiError>                                     │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Frontend re-renders form, summary and preview from InvoiceView         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod export;
pub mod invoice;
pub mod settings;
