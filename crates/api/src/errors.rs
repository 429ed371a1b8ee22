//! HTTP error responses
//!
//! Handlers return [`ApiError`]; its [`IntoResponse`] impl picks the status
//! code and writes a small JSON body. Upstream details stay in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};
use veriprint_domain::VeriprintError;

/// Error returned by route handlers
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub VeriprintError);

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: &'a str,
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self(VeriprintError::InvalidInput(message.into()))
    }

    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            VeriprintError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            VeriprintError::NotFound(_) => StatusCode::NOT_FOUND,
            VeriprintError::Network(_)
            | VeriprintError::Upstream { .. }
            | VeriprintError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            VeriprintError::Config(_) | VeriprintError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable label used in logs and the response body.
    pub fn error_label(&self) -> &'static str {
        match &self.0 {
            VeriprintError::InvalidInput(_) => "invalid_input",
            VeriprintError::NotFound(_) => "not_found",
            VeriprintError::Network(_) => "upstream_unreachable",
            VeriprintError::Upstream { .. } => "upstream_error",
            VeriprintError::MalformedResponse(_) => "malformed_response",
            VeriprintError::Config(_) => "config_error",
            VeriprintError::Internal(_) => "internal_error",
        }
    }

    /// Message safe to show to the caller.
    fn public_message(&self) -> &str {
        match &self.0 {
            VeriprintError::InvalidInput(msg) => msg,
            VeriprintError::NotFound(_) => "document not found",
            err if err.is_upstream_failure() => "upstream service unavailable",
            _ => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let label = self.error_label();

        if self.0.is_upstream_failure() {
            warn!(
                error = %self.0,
                error_label = label,
                status = status.as_u16(),
                "upstream request failed"
            );
        } else if status.is_server_error() {
            error!(error = %self.0, error_label = label, status = status.as_u16(), "request failed");
        } else {
            debug!(error = %self.0, error_label = label, status = status.as_u16(), "request rejected");
        }

        let body = ErrorBody { error: label, message: self.public_message() };
        (status, Json(body)).into_response()
    }
}
