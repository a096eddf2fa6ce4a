//! # PNG Raster Source
//!
//! The frontend captures the preview element to a PNG (at device scale) and
//! sends the bytes over IPC. This source decodes them to RGB8.

use invoice_core::export::{Raster, RasterSource};
use invoice_core::ExportError;
use tracing::debug;

use crate::error::PdfResult;

/// A PNG capture of the rendered preview.
#[derive(Debug, Clone)]
pub struct PngRaster {
    png: Vec<u8>,
}

impl PngRaster {
    pub fn new(png: Vec<u8>) -> Self {
        PngRaster { png }
    }

    /// Decodes to packed RGB. Any alpha channel is dropped.
    pub fn decode(&self) -> PdfResult<(u32, u32, Vec<u8>)> {
        let rgb = image::load_from_memory(&self.png)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        debug!(width, height, bytes = self.png.len(), "Decoded preview capture");
        Ok((width, height, rgb.into_raw()))
    }
}

impl RasterSource for PngRaster {
    fn capture(&self) -> Result<Raster, ExportError> {
        let (width, height, rgb) = self.decode()?;
        Raster::new(width, height, rgb)
    }
}

#[cfg(test)]
pub(crate) fn test_png(width: u32, height: u32) -> Vec<u8> {
    use std::io::Cursor;

    let img = image::RgbImage::from_pixel(width, height, image::Rgb([250, 250, 250]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
