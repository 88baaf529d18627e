//! Common error types and handling for VirtuDoc

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::vendor::VendorError;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the VirtuDoc gateway
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Vendor error: {0}")]
    Vendor(#[from] VendorError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Vendor(VendorError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Error::Vendor(VendorError::MissingCredential { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Vendor(_) => StatusCode::BAD_GATEWAY,
            Error::Unexpected(_) | Error::Serialization(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "ValidationError",
            Error::Vendor(VendorError::MissingCredential { .. }) => "MissingCredential",
            Error::Vendor(VendorError::Unavailable { .. } | VendorError::Status { .. }) => {
                "VendorUnavailable"
            }
            Error::Vendor(VendorError::Timeout { .. }) => "VendorTimeout",
            Error::Vendor(VendorError::Malformed { .. }) => "VendorResponseMalformed",
            Error::Unexpected(_) | Error::Serialization(_) | Error::Internal(_) => "InternalError",
        }
    }

    /// Message returned to API callers.
    ///
    /// Validation messages describe the caller's own input; everything else
    /// is replaced with a generic message so vendor bodies never leak.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::Vendor(e) => e.public_message(),
            Error::Unexpected(_) | Error::Serialization(_) | Error::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}

impl Error {
    /// Full detail goes to the log only
    #[mutants::skip] // Logging side effects only; the response is unaffected
    fn log(&self, status: StatusCode) {
        match self {
            Error::Vendor(e) => tracing::warn!(
                vendor = %e.vendor(),
                code = self.error_code(),
                error = %e,
                "Vendor call failed"
            ),
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "Internal server error")
            }
            _ => tracing::debug!(error = %self, "Request rejected"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        self.log(status);

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": self.public_message(),
            },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}
