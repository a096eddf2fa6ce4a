//! # API Error Type
//!
//! Unified error type for Tauri commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoke('edit_item')                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function → Result<T, ApiError>                          │  │
//! │  │                                                                  │  │
//! │  │  CoreError::ItemNotFound ─────────► NOT_FOUND                    │  │
//! │  │  CoreError::ConfirmationRequired ─► CONFIRMATION_REQUIRED        │  │
//! │  │  ValidationError ─────────────────► VALIDATION_ERROR             │  │
//! │  │  DbError ─────────────────────────► DATABASE_ERROR               │  │
//! │  │  ExportError ─────────────────────► EXPORT_FAILED / EXPORT_BUSY  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await invoke('export_pdf', { png })                                  │
//! │  } catch (e) {                                                          │
//! │    alert('Failed to generate PDF. Please try again.')                   │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use invoice_core::{CoreError, ExportError, ValidationError};
use invoice_db::DbError;
use serde::Serialize;

/// API error returned from Tauri commands.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Line item not found: 1700000000000"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Row id unknown
    NotFound,

    /// Malformed request (unknown field name, theme)
    ValidationError,

    /// Row limit reached
    LimitReached,

    /// Destructive action sent without confirmation
    ConfirmationRequired,

    /// Settings store failed
    DatabaseError,

    /// Another export is running
    ExportBusy,

    /// Capture, assembly or file write failed
    ExportFailed,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// An export failure. The cause is logged; the frontend gets a generic
    /// message for its alert.
    pub fn export_failed(cause: impl std::fmt::Display) -> Self {
        tracing::error!("Error generating PDF: {}", cause);
        ApiError::new(
            ErrorCode::ExportFailed,
            "Failed to generate PDF. Please try again.",
        )
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::TooManyItems { .. } => {
                ApiError::new(ErrorCode::LimitReached, err.to_string())
            }
            CoreError::ConfirmationRequired { .. } => {
                ApiError::new(ErrorCode::ConfirmationRequired, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::new(
                ErrorCode::NotFound,
                format!("{} not found: {}", entity, id),
            ),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::InProgress => ApiError::new(ErrorCode::ExportBusy, err.to_string()),
            other => ApiError::export_failed(other),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_core::ItemId;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::ItemNotFound(ItemId::new(5)).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Line item not found: 5");

        let err: ApiError = CoreError::ConfirmationRequired {
            action: "Clear all".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ConfirmationRequired);
    }

    #[test]
    fn test_export_errors() {
        let err: ApiError = ExportError::InProgress.into();
        assert_eq!(err.code, ErrorCode::ExportBusy);

        let err: ApiError = ExportError::Write("disk full".to_string()).into();
        assert_eq!(err.code, ErrorCode::ExportFailed);
        assert_eq!(err.message, "Failed to generate PDF. Please try again.");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("theme must be one of: [\"light\", \"dark\"]");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}
