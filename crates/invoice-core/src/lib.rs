//! # invoice-core: Pure Business Logic for the Invoice Builder
//!
//! This crate is the **heart** of the invoice builder. It owns the totals
//! engine, the preview renderer and the command reducer, all as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice Builder Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (webview form)                      │   │
//! │  │    Company/Client ──► Items table ──► Summary ──► Preview       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Tauri IPC                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Tauri Commands                               │   │
//! │  │    add_item, edit_item, edit_meta, clear_all, export_pdf        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ invoice-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  types   │  │  totals  │  │ preview  │  │ session      │   │   │
//! │  │   │ LineItem │  │  Totals  │  │ Preview  │  │ Command →    │   │   │
//! │  │   │ Meta     │  │  Money   │  │ Rows     │  │ InvoiceView  │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, InvoiceMeta, TaxRate, Theme)
//! - [`money`] - Display money in cents and currency formatting
//! - [`input`] - Lenient coercion of raw form input
//! - [`totals`] - Line and aggregate totals
//! - [`preview`] - Read-only preview model with placeholders
//! - [`invoice`] - The invoice model and its command reducer
//! - [`session`] - Dispatch loop that keeps the view in sync
//! - [`export`] - Page planning and export collaborator traits
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use invoice_core::totals::{compute_aggregate_totals, compute_line_total};
//! use invoice_core::types::{ItemId, LineItem, TaxRate};
//! use rust_decimal::Decimal;
//!
//! let line = compute_line_total(Decimal::from(2), Decimal::from(50), Decimal::from(10));
//! assert_eq!(line, Decimal::from(110));
//!
//! let items = vec![
//!     LineItem::new(ItemId::new(1), "Design", Decimal::from(2), Decimal::from(50), TaxRate::from_percent(Decimal::from(10))),
//!     LineItem::new(ItemId::new(2), "Hosting", Decimal::ONE, Decimal::from(20), TaxRate::zero()),
//! ];
//! let totals = compute_aggregate_totals(&items, Decimal::from(5));
//! assert_eq!(totals.grand_total, Decimal::from(125));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod input;
pub mod invoice;
pub mod money;
pub mod preview;
pub mod session;
pub mod totals;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ExportError, ValidationError};
pub use invoice::{Applied, Command, Environment, Invoice};
pub use money::{CurrencyFormat, Money};
pub use preview::Preview;
pub use session::{InvoiceView, Session, SyncState};
pub use totals::Totals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows allowed on a single invoice.
pub const MAX_LINE_ITEMS: usize = 100;

/// Tax percentage preselected on a freshly added row.
pub const DEFAULT_ITEM_TAX_PERCENT: u32 = 10;

/// Global tax field value on a fresh invoice.
pub const DEFAULT_INVOICE_TAX_PERCENT: u32 = 10;

/// Days between the invoice date and the default due date.
pub const DEFAULT_DUE_DAYS: i64 = 15;

/// Prefix of generated invoice numbers (`INV-4821`).
pub const INVOICE_NUMBER_PREFIX: &str = "INV-";
