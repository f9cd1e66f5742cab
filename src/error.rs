//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the HTTP layer. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Absent records are not errors: they are returned as JSON `null`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::PersistenceError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: preco must be a number"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the table on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Codes
///
/// | Code | Cause                              | HTTP Status                 |
/// |------|------------------------------------|-----------------------------|
/// | 1001 | Malformed or invalid request input | 400 Bad Request             |
/// | 3000 | Invalid database configuration     | 500 Internal Server Error   |
/// | 3001 | Unexpected persistence failure     | 500 Internal Server Error   |
/// | 3002 | Database unreachable               | 503 Service Unavailable     |
/// | 4001 | Store rejected the values          | 422 Unprocessable Entity    |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request input failed schema or value validation.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Error propagated from the persistence layer.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Persistence(PersistenceError::Configuration(_)) => 3000,
            Self::Persistence(PersistenceError::Query(_)) => 3001,
            Self::Persistence(PersistenceError::Connectivity(_)) => 3002,
            Self::Persistence(PersistenceError::Constraint(_)) => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(PersistenceError::Constraint(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Persistence(PersistenceError::Connectivity(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence(PersistenceError::Configuration(_) | PersistenceError::Query(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
