//! Error-to-status mapping.
//!
//! | Variant        | Status | `error` field                 |
//! |----------------|--------|-------------------------------|
//! | `Validation`   | 400    | joined validation messages    |
//! | `Unauthorized` | 401    | `Invalid API key`             |
//! | `NotFound`     | 404    | service message               |
//! | `MethodNotAllowed` | 405 | `Method not allowed`         |
//! | `Timeout`      | 408    | `Request timed out`           |
//! | `PayloadTooLarge` | 413 | `Request body too large`      |
//! | `Internal`     | 500    | `Internal server error`       |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::config::DeploymentMode;
use crate::http::response::ApiResponse;
use crate::observability::metrics;
use crate::services::{ServiceError, ServiceErrorKind};
use crate::validation::ValidationErrors;

pub const UNAUTHORIZED_MESSAGE: &str = "Invalid API key";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Client input malformed.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credential. Never carries detail.
    #[error("Invalid API key")]
    Unauthorized,

    /// Target resource absent.
    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request timed out")]
    Timeout,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// Anything else. `detail` is only populated outside production.
    #[error("Internal server error")]
    Internal { detail: Option<String> },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a domain-service failure by its kind.
    pub fn from_service(err: ServiceError, mode: DeploymentMode) -> Self {
        metrics::record_service_error(err.kind.as_str());

        match err.kind {
            ServiceErrorKind::NotFound => ApiError::NotFound(err.message),
            ServiceErrorKind::Validation => ApiError::Validation(err.message),
            ServiceErrorKind::Internal => {
                tracing::error!(error = %err.message, "Service failure");
                ApiError::Internal {
                    detail: mode.exposes_error_details().then_some(err.message),
                }
            }
        }
    }

    /// Envelope equivalent of a bare status produced below the handlers
    /// (by tower layers or axum itself).
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::METHOD_NOT_ALLOWED => ApiError::MethodNotAllowed,
            StatusCode::REQUEST_TIMEOUT => ApiError::Timeout,
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound("Route not found".to_string()),
            s if s.is_client_error() => ApiError::Validation(
                s.canonical_reason().unwrap_or("Bad request").to_string(),
            ),
            _ => ApiError::Internal { detail: None },
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.joined())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Internal { detail } => ApiResponse::failure(INTERNAL_MESSAGE, detail),
            other => ApiResponse::failure(other.to_string(), None),
        };
        (status, Json(body)).into_response()
    }
}
