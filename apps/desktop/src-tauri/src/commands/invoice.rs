//! # Invoice Commands
//!
//! Row mutation API and meta edits. Every mutating command returns the
//! fresh [`InvoiceView`], so the frontend never computes a total itself.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  App start ──► one default row                                          │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │   add_item / remove_item / edit_item / edit_meta  (any order, any time) │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │   clear_all { confirmed: true } ──► fresh meta + one default row        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tauri::State;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{InvoiceState, SystemEnvironment};
use invoice_core::{Command, InvoiceView, ItemField, ItemId, MetaField};

/// Gets the current invoice view.
#[tauri::command]
pub fn get_invoice(invoice: State<'_, InvoiceState>) -> InvoiceView {
    debug!("get_invoice command");
    invoice.view()
}

/// Appends a default row (qty 1, price 0, tax 10%).
#[tauri::command]
pub fn add_item(invoice: State<'_, InvoiceState>) -> Result<InvoiceView, ApiError> {
    debug!("add_item command");
    Ok(invoice.dispatch(Command::AddRow, &SystemEnvironment)?)
}

#[tauri::command]
pub fn remove_item(invoice: State<'_, InvoiceState>, id: u64) -> Result<InvoiceView, ApiError> {
    debug!(id, "remove_item command");
    Ok(invoice.dispatch(Command::RemoveRow { id: ItemId::new(id) }, &SystemEnvironment)?)
}

/// Edits one field of a row.
///
/// ## Arguments
/// * `field` - `description`, `quantity`, `unitPrice` or `taxRate`
/// * `value` - Raw input text; numbers are coerced leniently
#[tauri::command]
pub fn edit_item(
    invoice: State<'_, InvoiceState>,
    id: u64,
    field: String,
    value: String,
) -> Result<InvoiceView, ApiError> {
    debug!(id, field = %field, "edit_item command");
    let field: ItemField = field.parse()?;

    Ok(invoice.dispatch(
        Command::EditItem {
            id: ItemId::new(id),
            field,
            value,
        },
        &SystemEnvironment,
    )?)
}

/// Edits a company, client, invoice detail, note, tax or discount field.
#[tauri::command]
pub fn edit_meta(
    invoice: State<'_, InvoiceState>,
    field: String,
    value: String,
) -> Result<InvoiceView, ApiError> {
    debug!(field = %field, "edit_meta command");
    let field: MetaField = field.parse()?;

    Ok(invoice.dispatch(Command::EditMeta { field, value }, &SystemEnvironment)?)
}

/// Resets the form.
///
/// ## User Workflow
/// ```text
/// Click "Clear all" ──► confirm("Are you sure you want to clear all fields?")
///                            │
///              ┌─────────────┴─────────────┐
///              ▼                           ▼
///   invoke('clear_all',          invoke('clear_all',
///     { confirmed: true })         { confirmed: false })
///              │                           │
///              ▼                           ▼
///   fresh invoice, one row       CONFIRMATION_REQUIRED, nothing changes
/// ```
#[tauri::command]
pub fn clear_all(
    invoice: State<'_, InvoiceState>,
    confirmed: bool,
) -> Result<InvoiceView, ApiError> {
    debug!(confirmed, "clear_all command");

    let view = invoice.dispatch_all(
        [Command::ClearAll { confirmed }, Command::AddRow],
        &SystemEnvironment,
    )?;

    info!(invoice_number = %view.meta.invoice_number, "Invoice cleared");
    Ok(view)
}
