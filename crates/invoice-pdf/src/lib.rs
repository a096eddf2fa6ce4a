//! # invoice-pdf: Export Collaborators
//!
//! [`PngRaster`] turns the webview's PNG capture of the preview into a
//! [`Raster`](invoice_core::export::Raster); [`PdfWriter`] lays that raster
//! out on A4 pages following an
//! [`ExportPlan`](invoice_core::export::ExportPlan).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use invoice_core::export::{export_document, ExportGate};
//! use invoice_pdf::{PdfWriter, PngRaster};
//!
//! let gate = ExportGate::new();
//! let source = PngRaster::new(png_bytes);
//! let writer = PdfWriter::new().with_title("INV-4821");
//! let doc = export_document(&gate, &source, &writer, "INV-4821")?;
//! std::fs::write(dir.join(&doc.filename), &doc.bytes)?;
//! ```

pub mod error;
pub mod raster;
pub mod writer;

pub use error::{PdfError, PdfResult};
pub use raster::PngRaster;
pub use writer::PdfWriter;
