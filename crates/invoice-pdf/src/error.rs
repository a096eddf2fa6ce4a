//! # Export Collaborator Errors

use invoice_core::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    /// The capture could not be decoded.
    #[error("Image decoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// lopdf refused to encode or serialize the document.
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Serializing the finished document failed.
    #[error("PDF serialization failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type PdfResult<T> = Result<T, PdfError>;

/// Decode failures are capture failures; anything raised while assembling or
/// serializing is a write failure.
impl From<PdfError> for ExportError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Image(e) => ExportError::Capture(e.to_string()),
            PdfError::Pdf(e) => ExportError::Write(e.to_string()),
            PdfError::Io(e) => ExportError::Write(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn save_failure() -> PdfResult<()> {
        Err(io::Error::new(io::ErrorKind::WriteZero, "sink closed"))?
    }

    #[test]
    fn test_serialization_failure_is_write_error() {
        let err = save_failure().unwrap_err();
        assert!(matches!(err, PdfError::Io(_)));

        match ExportError::from(err) {
            ExportError::Write(message) => assert!(message.contains("sink closed")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_failure_is_capture_error() {
        let err = PdfError::from(image::load_from_memory(b"not a png").unwrap_err());
        assert!(matches!(ExportError::from(err), ExportError::Capture(_)));
    }
}
