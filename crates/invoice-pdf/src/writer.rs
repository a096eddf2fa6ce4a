//! # PDF Writer
//!
//! Assembles the exported PDF with lopdf.
//!
//! ## Document Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog ──► Pages ──┬──► Page 1 ──► Contents: q cm /Im0 Do Q          │
//! │                      ├──► Page 2 ──► Contents: q cm /Im0 Do Q          │
//! │                      └──► ...                                          │
//! │                                                                         │
//! │  Every page references the same image XObject (stored once) and        │
//! │  differs only in the vertical translation of the `cm` operator.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Coordinates
//! Plans are in millimetres measured down from the page top. PDF user space
//! is in points measured up from the page bottom, so an image whose top sits
//! at `top` mm is drawn with its lower-left corner at
//! `page_height - top - image_height`.

use invoice_core::export::{DocumentWriter, ExportPlan, PagePlacement, Raster};
use invoice_core::ExportError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, info};

use crate::error::PdfResult;

/// Points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Resource name of the shared image.
const IMAGE_NAME: &[u8] = b"Im0";

const PRODUCER: &str = "Invoice Builder";

fn mm_to_pt(mm: f64) -> f32 {
    (mm * PT_PER_MM) as f32
}

/// Writes a PDF with one page per plan entry.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    title: Option<String>,
    compress: bool,
}

impl PdfWriter {
    /// A writer that flate-compresses streams.
    pub fn new() -> Self {
        PdfWriter {
            title: None,
            compress: true,
        }
    }

    /// Sets the document title shown by PDF viewers.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Leaves streams uncompressed (readable with a text editor).
    pub fn uncompressed(mut self) -> Self {
        self.compress = false;
        self
    }

    /// Builds the document and serializes it.
    pub fn render(&self, plan: &ExportPlan, raster: &Raster) -> PdfResult<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let size = raster.size();
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(size.width_px),
                "Height" => i64::from(size.height_px),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            raster.rgb().to_vec(),
        ));

        let resources_id = doc.add_object(dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        });

        let media_box: Vec<Object> = vec![
            0_i64.into(),
            0_i64.into(),
            mm_to_pt(plan.geometry.width_mm).into(),
            mm_to_pt(plan.geometry.height_mm).into(),
        ];

        let mut kids: Vec<Object> = Vec::with_capacity(plan.pages.len());
        for placement in &plan.pages {
            let page_id = add_page(&mut doc, plan, placement, pages_id, resources_id, &media_box)?;
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => plan.pages.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::string_literal(title.as_str()));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        if self.compress {
            doc.compress();
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        info!(
            pages = plan.pages.len(),
            width_px = size.width_px,
            height_px = size.height_px,
            bytes = bytes.len(),
            "PDF assembled"
        );
        Ok(bytes)
    }
}

fn add_page(
    doc: &mut Document,
    plan: &ExportPlan,
    placement: &PagePlacement,
    pages_id: ObjectId,
    resources_id: ObjectId,
    media_box: &[Object],
) -> PdfResult<ObjectId> {
    let bottom_mm = plan.geometry.height_mm - placement.image_top_mm - plan.image_height_mm;
    debug!(
        page = placement.index,
        image_top_mm = placement.image_top_mm,
        bottom_mm,
        "Placing page"
    );

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    mm_to_pt(plan.image_width_mm).into(),
                    0_i64.into(),
                    0_i64.into(),
                    mm_to_pt(plan.image_height_mm).into(),
                    0_i64.into(),
                    mm_to_pt(bottom_mm).into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box.to_vec(),
        "Contents" => content_id,
        "Resources" => resources_id,
    }))
}

impl Default for PdfWriter {
    fn default() -> Self {
        PdfWriter::new()
    }
}

impl DocumentWriter for PdfWriter {
    fn write(&self, plan: &ExportPlan, raster: &Raster) -> Result<Vec<u8>, ExportError> {
        Ok(self.render(plan, raster)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
