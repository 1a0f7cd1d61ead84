//! Mapping of domain errors onto HTTP responses.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind};

/// Standard error body for every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }
}

/// Handler error wrapping a `DomainError`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }

    pub fn status(&self) -> StatusCode {
        status_for(&self.0)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

/// HTTP status for a domain error.
///
/// Duplicate reviews are a state failure in the domain but surface as 409.
pub fn status_for(err: &DomainError) -> StatusCode {
    if err.code == ErrorCode::AlreadyReviewed {
        return StatusCode::CONFLICT;
    }
    match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::InvalidArgument | ErrorKind::IllegalState => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::AuthenticationFailure => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let DomainError {
            code,
            message,
            details,
        } = self.0;

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error_code = %code, "{}", message);
            ErrorResponse::new(code.to_string(), "An internal error occurred")
        } else {
            ErrorResponse {
                error: code.to_string(),
                message,
                details,
            }
        };

        (status, Json(body)).into_response()
    }
}
