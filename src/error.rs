//! Error types.
//!
//! Two tiers, deliberately separate:
//!
//! - [`Error`] surfaces infrastructure failures: binding the port, accepting
//!   a connection. If you see one, the server itself is in trouble.
//! - [`ApiError`] is the request-level error every handler and guard returns.
//!   It maps to exactly one JSON response shape, `{"error": "..."}`, with the
//!   status code decided by the variant. One mapping, one place.

use std::fmt;

use http::StatusCode;

use crate::response::{IntoResponse, Response};

// ── Infrastructure errors ─────────────────────────────────────────────────────

/// Returned by [`Server::serve`](crate::Server::serve).
///
/// Request-level failures (400, 404, ...) never become an `Error`; they are
/// expressed as [`ApiError`] and answered over the wire.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "io: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}

// ── Request-level errors ──────────────────────────────────────────────────────

/// A request that cannot be served as asked.
///
/// Guards and handlers return `Result<_, ApiError>`; the conversion below is
/// the only path from an error to an HTTP response, so every failure in the
/// service answers with the same body shape.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete request body or query. Answers 400.
    #[error("{0}")]
    Validation(String),

    /// The request did not pass the auth gate. Answers 401.
    #[error("{0}")]
    Unauthorized(String),

    /// No record with the requested id. Answers 404.
    #[error("{0}")]
    NotFound(String),

    /// Anything the service itself got wrong. Answers 500.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// The status code this error answers with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        Response::builder()
            .status(self.status())
            .json(serde_json::to_vec(&body).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_shape() {
        let resp = ApiError::not_found("Product not found").into_response();
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["error"], "Product not found");
    }
}
