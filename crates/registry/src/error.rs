//! Error taxonomy for the storage engine and HTTP router.
//!
//! Variants map directly onto the HTTP status codes the router returns;
//! [`RegistryError::status_code`] is the single place that mapping lives so
//! handlers never hand-pick a status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Result type for this crate.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors surfaced by storage mutations and the HTTP router.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Request body was not valid JSON, or was missing required fields.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No packument or tarball exists for the requested name.
    #[error("not found: {0}")]
    NotFound(String),

    /// Method not supported for this route.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Version already published, or `_rev` mismatch on a conditional write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Upstream proxy fetch failed and no local data could answer instead.
    #[error("upstream unavailable: {0}")]
    BadGateway(String),

    /// A filesystem operation on the storage root failed.
    #[error("storage I/O failure: {0}")]
    Io(String),

    /// Anything else; should be rare enough to always warrant a look.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// The HTTP status this error is reported as.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The short error code embedded in the JSON error body, matching the
    /// npm registry's own `error` field conventions.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Conflict(_) => "conflict",
            Self::BadGateway(_) => "bad_gateway",
            Self::Io(_) | Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = json!({ "error": self.code(), "reason": self.to_string() });
        (status, Json(body)).into_response()
    }
}
