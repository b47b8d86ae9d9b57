//! Error types for the RADAR domain layer.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CursorError`] - Pagination cursor decode/encode failures
//! - [`StorageError`] - Database/repository errors
//! - [`DomainError`] - Top-level domain errors returned by the ports
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Cursor Errors
// =============================================================================

/// Failures while decoding or building a pagination cursor.
///
/// A non-empty cursor that does not parse is always an error; it is never
/// silently treated as "first page", since that would return wrong rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    /// Token is not valid URL-safe base64.
    #[error("Cursor is not valid base64: {0}")]
    BadEncoding(String),

    /// Decoded token bytes are not valid UTF-8.
    #[error("Cursor payload is not valid UTF-8")]
    BadPayload,

    /// Decoded token has the wrong number of delimited fields.
    #[error("Cursor has {got} fields, expected {expected}")]
    FieldCount { expected: usize, got: usize },

    /// A field failed to parse into its expected type.
    #[error("Cursor field '{field}' has invalid value: {value}")]
    BadField { field: &'static str, value: String },

    /// A seek field contains the cursor delimiter and cannot be encoded.
    #[error("Seek field contains the cursor delimiter: {0}")]
    DelimiterInField(String),

    /// Page size is negative, or a cursor embeds a non-positive page size.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(i32),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Database and repository errors.
///
/// These errors originate from storage operations like connection
/// acquisition, query execution, and row-to-model conversion.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to establish database connection.
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// SQL query execution failed.
    #[error("Query execution error: {0}")]
    QueryError(String),

    /// Requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Row data could not be converted into a domain model.
    #[error("Data conversion error: {0}")]
    ConversionError(String),
}

// =============================================================================
// Domain Errors
// =============================================================================

/// Top-level errors returned by the repository ports.
///
/// This is the error type HTTP handlers map onto status codes:
/// cursor and mask problems are client errors, [`DomainError::NotFound`]
/// is 404 for the entity families whose contract defines it, and
/// storage failures are opaque server errors.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Pagination cursor was malformed or inconsistent.
    #[error("Bad cursor: {0}")]
    BadCursor(#[from] CursorError),

    /// A filter mask was not a valid regular expression.
    #[error("Invalid mask '{pattern}': {reason}")]
    InvalidMask { pattern: String, reason: String },

    /// The requested entity does not exist.
    ///
    /// Only raised for families whose endpoint contract defines
    /// "no matching resource" as an error; catalog queries return
    /// an empty page instead.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversion_chain() {
        // Cursor -> Domain
        let cursor_err = CursorError::InvalidPageSize(-5);
        let domain_err: DomainError = cursor_err.into();
        assert!(domain_err.to_string().contains("-5"));

        // Storage -> Domain
        let storage_err = StorageError::QueryError("db failed".into());
        let domain_err: DomainError = storage_err.into();
        assert!(domain_err.to_string().contains("db failed"));
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = DomainError::NotFound {
            kind: "clob",
            id: "SPK/NOTES".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("clob") && msg.contains("SPK/NOTES"));
    }
}
