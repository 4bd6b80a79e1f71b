//! Response envelope.
//!
//! Every endpoint answers with the same JSON shape:
//!
//! ```text
//! { success, data?, error?, message?, details? }
//! ```
//!
//! # Design Decisions
//! - Fields are private; the constructors are the only way to build an
//!   envelope, so `success=true` never carries `error` and `success=false`
//!   never carries `data`
//! - Absent fields are omitted rather than serialized as `null`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            details: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            details,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let body = serde_json::to_value(ApiResponse::ok(json!({ "uuid": "abc" }))).unwrap();
        assert_eq!(body, json!({ "success": true, "data": { "uuid": "abc" } }));
    }

    #[test]
    fn test_success_with_message() {
        let envelope = ApiResponse::ok_with_message(1, "done");
        assert!(envelope.is_success());
        assert_eq!(envelope.message(), Some("done"));
        assert!(envelope.error().is_none());
    }

    #[test]
    fn test_failure_shape() {
        let body = serde_json::to_value(ApiResponse::failure("Invalid API key", None)).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "Invalid API key" }));

        let with_details = ApiResponse::failure("Internal server error", Some("db down".into()));
        assert!(with_details.data().is_none());
        assert_eq!(with_details.details(), Some("db down"));
    }

    #[test]
    fn test_deserializes_sparse_envelope() {
        let parsed: ApiResponse<u32> = serde_json::from_value(json!({ "success": true, "data": 7 })).unwrap();
        assert_eq!(parsed.into_data(), Some(7));
    }
}
