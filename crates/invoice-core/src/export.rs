//! # Export Planning
//!
//! Turns a captured preview bitmap into a paginated document plan, and
//! defines the two collaborators that do the actual I/O.
//!
//! ## Export Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ExportGate::begin()        button disabled (guard held)                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  RasterSource::capture()    preview → RGB bitmap                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ExportPlan::new()          image scaled to page width, sliced into     │
//! │        │                    page-height bands                           │
//! │        ▼                                                                │
//! │  DocumentWriter::write()    one page per band                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  drop(guard)                button re-enabled, success or failure       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Page Bands (A4, image 630mm tall)
//! ```text
//!   page 1: image top at    0mm
//!   page 2: image top at -333mm   (height_left 630 → 333)
//!   page 3: image top at  -36mm   (height_left 333 →  36, loop ends)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ExportError;
use crate::input::is_blank;

/// File name used when the invoice number is blank.
pub const DEFAULT_EXPORT_STEM: &str = "invoice";

// =============================================================================
// Geometry
// =============================================================================

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

/// Pixel dimensions of a captured bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSize {
    pub width_px: u32,
    pub height_px: u32,
}

/// A captured preview: tightly packed 8-bit RGB, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    size: RasterSize,
    rgb: Vec<u8>,
}

impl Raster {
    /// Wraps RGB bytes, rejecting empty or mis-sized buffers.
    pub fn new(width_px: u32, height_px: u32, rgb: Vec<u8>) -> Result<Self, ExportError> {
        if width_px == 0 || height_px == 0 {
            return Err(ExportError::EmptyRaster {
                width: width_px,
                height: height_px,
            });
        }

        let expected = width_px as usize * height_px as usize * 3;
        if rgb.len() != expected {
            return Err(ExportError::Capture(format!(
                "expected {} RGB bytes for {}x{}, got {}",
                expected,
                width_px,
                height_px,
                rgb.len()
            )));
        }

        Ok(Raster {
            size: RasterSize { width_px, height_px },
            rgb,
        })
    }

    pub fn size(&self) -> RasterSize {
        self.size
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }
}

// =============================================================================
// Export Plan
// =============================================================================

/// Where the full image is drawn on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// Zero-based page number.
    pub index: usize,

    /// Vertical position of the image's top edge, measured down from the
    /// page's top edge. Zero or negative.
    pub image_top_mm: f64,
}

/// Pagination of one captured preview.
///
/// Every page draws the whole image at page width; only the vertical
/// offset differs, so each page shows a different band.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    pub geometry: PageGeometry,
    pub image_width_mm: f64,
    pub image_height_mm: f64,
    pub pages: Vec<PagePlacement>,
}

impl ExportPlan {
    pub fn new(geometry: PageGeometry, raster: RasterSize) -> Result<Self, ExportError> {
        if raster.width_px == 0 || raster.height_px == 0 {
            return Err(ExportError::EmptyRaster {
                width: raster.width_px,
                height: raster.height_px,
            });
        }

        let image_width_mm = geometry.width_mm;
        let image_height_mm =
            f64::from(raster.height_px) * image_width_mm / f64::from(raster.width_px);

        let mut pages = vec![PagePlacement {
            index: 0,
            image_top_mm: 0.0,
        }];

        let mut height_left = image_height_mm;
        while height_left >= geometry.height_mm {
            let position = height_left - geometry.height_mm;
            pages.push(PagePlacement {
                index: pages.len(),
                image_top_mm: -position,
            });
            height_left -= geometry.height_mm;
        }

        Ok(ExportPlan {
            geometry,
            image_width_mm,
            image_height_mm,
            pages,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Output file name for an invoice number: `INV-4821.pdf`.
///
/// Blank numbers fall back to `invoice.pdf`. Path separators become `-` so
/// the file always lands in the export directory itself.
///
/// ## Example
/// ```rust
/// use invoice_core::export::export_filename;
///
/// assert_eq!(export_filename("INV-4821"), "INV-4821.pdf");
/// assert_eq!(export_filename(""), "invoice.pdf");
/// assert_eq!(export_filename("2024/07"), "2024-07.pdf");
/// ```
pub fn export_filename(invoice_number: &str) -> String {
    let stem = if is_blank(invoice_number) {
        DEFAULT_EXPORT_STEM.to_string()
    } else {
        invoice_number.trim().replace(['/', '\\'], "-")
    };
    format!("{}.pdf", stem)
}

// =============================================================================
// Collaborators
// =============================================================================

/// Produces the bitmap of the rendered preview.
pub trait RasterSource {
    fn capture(&self) -> Result<Raster, ExportError>;
}

/// Assembles a paginated document from a bitmap.
pub trait DocumentWriter {
    fn write(&self, plan: &ExportPlan, raster: &Raster) -> Result<Vec<u8>, ExportError>;
}

// =============================================================================
// Export Gate
// =============================================================================

/// Allows one export at a time.
#[derive(Debug, Default)]
pub struct ExportGate {
    busy: AtomicBool,
}

/// Held for the duration of an export. Dropping it reopens the gate.
#[derive(Debug)]
pub struct ExportGuard<'a> {
    gate: &'a ExportGate,
}

impl ExportGate {
    pub fn new() -> Self {
        ExportGate::default()
    }

    pub fn begin(&self) -> Result<ExportGuard<'_>, ExportError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::InProgress)?;
        Ok(ExportGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

// =============================================================================
// Export
// =============================================================================

/// A finished export, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub pages: usize,
    pub bytes: Vec<u8>,
}

/// Runs one export on A4 pages.
///
/// The gate is closed while this runs and reopened before it returns,
/// whatever the outcome.
pub fn export_document(
    gate: &ExportGate,
    source: &dyn RasterSource,
    writer: &dyn DocumentWriter,
    invoice_number: &str,
) -> Result<ExportedDocument, ExportError> {
    let _guard = gate.begin()?;

    let raster = source.capture()?;
    let plan = ExportPlan::new(PageGeometry::A4, raster.size())?;
    let bytes = writer.write(&plan, &raster)?;

    Ok(ExportedDocument {
        filename: export_filename(invoice_number),
        pages: plan.page_count(),
        bytes,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(width_px: u32, height_px: u32) -> ExportPlan {
        ExportPlan::new(PageGeometry::A4, RasterSize { width_px, height_px }).unwrap()
    }

    fn tops(plan: &ExportPlan) -> Vec<f64> {
        plan.pages.iter().map(|p| p.image_top_mm).collect()
    }

    struct SolidRaster {
        width: u32,
        height: u32,
    }

    impl RasterSource for SolidRaster {
        fn capture(&self) -> Result<Raster, ExportError> {
            let len = self.width as usize * self.height as usize * 3;
            Raster::new(self.width, self.height, vec![255; len])
        }
    }

    struct FailingSource;

    impl RasterSource for FailingSource {
        fn capture(&self) -> Result<Raster, ExportError> {
            Err(ExportError::Capture("webview gone".to_string()))
        }
    }

    /// Writes one byte per page.
    struct CountingWriter;

    impl DocumentWriter for CountingWriter {
        fn write(&self, plan: &ExportPlan, _raster: &Raster) -> Result<Vec<u8>, ExportError> {
            Ok(vec![0; plan.page_count()])
        }
    }

    #[test]
    fn test_short_preview_is_one_page() {
        let plan = plan(1000, 1000);
        assert_eq!(plan.image_width_mm, 210.0);
        assert_eq!(plan.image_height_mm, 210.0);
        assert_eq!(tops(&plan), vec![0.0]);
    }

    #[test]
    fn test_two_pages() {
        let plan = plan(1000, 2000);
        assert_eq!(plan.image_height_mm, 420.0);
        assert_eq!(tops(&plan), vec![0.0, -123.0]);
    }

    #[test]
    fn test_three_pages() {
        let plan = plan(100, 300);
        assert_eq!(plan.image_height_mm, 630.0);
        assert_eq!(tops(&plan), vec![0.0, -333.0, -36.0]);
        assert_eq!(
            plan.pages.iter().map(|p| p.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_exactly_one_page_tall_adds_second_page() {
        let plan = plan(210, 297);
        assert_eq!(plan.image_height_mm, 297.0);
        assert_eq!(tops(&plan), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_raster_rejected() {
        let err = ExportPlan::new(PageGeometry::A4, RasterSize { width_px: 0, height_px: 10 })
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyRaster { width: 0, height: 10 }));

        let err = Raster::new(2, 2, vec![0; 5]).unwrap_err();
        assert!(matches!(err, ExportError::Capture(_)));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("INV-4821"), "INV-4821.pdf");
        assert_eq!(export_filename(""), "invoice.pdf");
        assert_eq!(export_filename("   "), "invoice.pdf");
        assert_eq!(export_filename(" INV-7 "), "INV-7.pdf");
        assert_eq!(export_filename("a/b\\c"), "a-b-c.pdf");
    }

    #[test]
    fn test_gate_allows_one_export_at_a_time() {
        let gate = ExportGate::new();
        let guard = gate.begin().unwrap();
        assert!(gate.is_busy());
        assert!(matches!(gate.begin(), Err(ExportError::InProgress)));

        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.begin().is_ok());
    }

    #[test]
    fn test_export_document() {
        let gate = ExportGate::new();
        let source = SolidRaster { width: 100, height: 300 };

        let doc = export_document(&gate, &source, &CountingWriter, "INV-4821").unwrap();
        assert_eq!(doc.filename, "INV-4821.pdf");
        assert_eq!(doc.pages, 3);
        assert_eq!(doc.bytes.len(), 3);
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_failed_export_reopens_gate() {
        let gate = ExportGate::new();

        let err = export_document(&gate, &FailingSource, &CountingWriter, "INV-1").unwrap_err();
        assert!(matches!(err, ExportError::Capture(_)));
        assert!(!gate.is_busy());

        let source = SolidRaster { width: 10, height: 10 };
        assert!(export_document(&gate, &source, &CountingWriter, "").is_ok());
    }
}
