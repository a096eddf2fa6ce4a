//! # Export Commands
//!
//! ## PDF Export Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Click "Generate PDF"                                                   │
//! │       │  frontend disables the button, captures #invoicePreview as PNG  │
//! │       ▼                                                                 │
//! │  invoke('export_pdf', { png })                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Snapshot the invoice number (session is not touched again) │    │
//! │  │  2. Blocking task: gate → decode PNG → plan pages → write PDF  │    │
//! │  │  3. Save <export dir>/<invoice number>.pdf                     │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ├── Ok  ──► { path, pages }                                       │
//! │       └── Err ──► EXPORT_FAILED ──► alert(...)                          │
//! │                                                                         │
//! │  Either way the button is re-enabled and the form is unchanged.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::path::Path;
use tauri::{State, WebviewWindow};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, ExportState, InvoiceState};
use invoice_core::export::{export_document, ExportedDocument};
use invoice_pdf::{PdfWriter, PngRaster};

/// What the frontend shows after a successful export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub filename: String,
    pub pages: usize,
    pub bytes: usize,
}

/// Exports the captured preview as a paginated A4 PDF.
///
/// ## Arguments
/// * `png` - PNG bytes of the rendered preview
///
/// ## Errors
/// * `EXPORT_BUSY` - another export is still running
/// * `EXPORT_FAILED` - decode, assembly or the file write failed
#[tauri::command]
pub async fn export_pdf(
    invoice: State<'_, InvoiceState>,
    config: State<'_, ConfigState>,
    export: State<'_, ExportState>,
    png: Vec<u8>,
) -> Result<ExportResult, ApiError> {
    let invoice_number = invoice.invoice_number();
    debug!(invoice_number = %invoice_number, png_bytes = png.len(), "export_pdf command");

    let gate = export.gate();
    let doc = tauri::async_runtime::spawn_blocking(move || {
        let source = PngRaster::new(png);
        let writer = PdfWriter::new().with_title(invoice_number.clone());
        export_document(&gate, &source, &writer, &invoice_number)
    })
    .await
    .map_err(ApiError::export_failed)??;

    let path = save(&config.export_dir, &doc)?;
    info!(path = %path, pages = doc.pages, "Invoice exported");

    Ok(ExportResult {
        path,
        filename: doc.filename,
        pages: doc.pages,
        bytes: doc.bytes.len(),
    })
}

fn save(dir: &Path, doc: &ExportedDocument) -> Result<String, ApiError> {
    std::fs::create_dir_all(dir).map_err(ApiError::export_failed)?;

    let path = dir.join(&doc.filename);
    std::fs::write(&path, &doc.bytes).map_err(ApiError::export_failed)?;

    Ok(path.display().to_string())
}

/// Opens the system print dialog for the window.
#[tauri::command]
pub fn print_invoice(window: WebviewWindow) -> Result<(), ApiError> {
    debug!("print_invoice command");
    window
        .print()
        .map_err(|e| ApiError::internal(format!("Could not open print dialog: {}", e)))
}
