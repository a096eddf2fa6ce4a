//! # Error Types
//!
//! Domain-specific error types for invoice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoice-core errors (this file)                                       │
//! │  ├── CoreError        - Rejected commands                              │
//! │  ├── ValidationError  - Malformed IPC input (field names, themes)      │
//! │  └── ExportError      - Export pipeline failures                       │
//! │                                                                         │
//! │  invoice-db errors (separate crate)                                    │
//! │  └── DbError          - Settings store failures                        │
//! │                                                                         │
//! │  Tauri API errors (in app)                                             │
//! │  └── ApiError         - What frontend sees (serialized)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed *numbers* are not errors: they coerce to zero in
//! [`crate::input`]. Only structurally wrong requests end up here.

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// A command the reducer refused to apply.
///
/// Whenever one of these is returned the invoice is left exactly as it was.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Row id does not exist (already removed, or never created).
    #[error("Line item not found: {0}")]
    ItemNotFound(ItemId),

    /// Invoice already holds the maximum number of rows.
    #[error("Invoice cannot have more than {max} line items")]
    TooManyItems { max: usize },

    /// A destructive action was requested without user confirmation.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Clear all"
    ///      │
    ///      ▼
    /// confirm("Are you sure...?") ── cancel ──► ClearAll { confirmed: false }
    ///      │                                          │
    ///      ▼                                          ▼
    /// ClearAll { confirmed: true }            ConfirmationRequired
    ///      │                                   (nothing changes)
    ///      ▼
    /// Fresh invoice
    /// ```
    #[error("{action} requires confirmation")]
    ConfirmationRequired { action: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structural input errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Export Error
// =============================================================================

/// Failures of the PDF export pipeline.
///
/// None of these touch the invoice; the user may simply retry.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An export is already running (the button is disabled).
    #[error("An export is already in progress")]
    InProgress,

    /// The captured preview has no pixels.
    #[error("Captured preview is empty ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },

    /// The raster source could not produce a bitmap.
    #[error("Failed to capture preview: {0}")]
    Capture(String),

    /// The document writer failed to assemble the file.
    #[error("Failed to write document: {0}")]
    Write(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound(ItemId::new(1_700_000_000_000));
        assert_eq!(err.to_string(), "Line item not found: 1700000000000");

        let err = CoreError::ConfirmationRequired {
            action: "Clear all".to_string(),
        };
        assert_eq!(err.to_string(), "Clear all requires confirmation");
    }

    #[test]
    fn test_export_error_messages() {
        let err = ExportError::EmptyRaster {
            width: 0,
            height: 120,
        };
        assert_eq!(err.to_string(), "Captured preview is empty (0x120)");
    }

    #[test]
    fn test_not_allowed_lists_choices() {
        let err = ValidationError::NotAllowed {
            field: "theme".to_string(),
            allowed: vec!["light".to_string(), "dark".to_string()],
        };
        assert_eq!(err.to_string(), "theme must be one of: [\"light\", \"dark\"]");
    }
}
