//! HTTP error mapping.
//!
//! Domain errors cross the HTTP boundary exactly once, here. Client
//! mistakes (bad cursor, bad mask, bad page size) become 400s with the
//! domain message; missing entities become 404s; storage failures are
//! logged server-side and surface as an opaque 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use radar_core::error::{CursorError, DomainError};
use radar_core::metrics::{record_bad_cursor, record_not_found};

/// Error type returned by every handler.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<CursorError> for ApiError {
    fn from(err: CursorError) -> Self {
        Self(DomainError::BadCursor(err))
    }
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::BadCursor(e) => {
                record_bad_cursor();
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            DomainError::InvalidMask { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            DomainError::NotFound { kind, .. } => {
                record_not_found(kind);
                (StatusCode::NOT_FOUND, self.0.to_string())
            }
            DomainError::Storage(e) => {
                // Database details stay in the logs, not the response
                error!(error = %e, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::error::StorageError;

    #[test]
    fn bad_cursor_maps_to_400() {
        let err = ApiError::from(CursorError::InvalidPageSize(-3));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(DomainError::NotFound {
            kind: "location",
            id: "SPK/SACR".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failure_is_opaque_500() {
        let err = ApiError::from(DomainError::Storage(StorageError::QueryError(
            "relation av_location does not exist".into(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_mask_maps_to_400() {
        let err = ApiError::from(DomainError::InvalidMask {
            pattern: "[bad".into(),
            reason: "unclosed character class".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
