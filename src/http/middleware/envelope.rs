//! Error envelope for responses produced below the handlers.
//!
//! Tower layers (timeout, body limit) and axum's own rejections answer with
//! empty or `text/plain` bodies. This hook rewrites any such error response
//! into the JSON envelope, keeping its status and other headers.

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;

pub async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(response.headers()) {
        return response;
    }

    let (parts, _) = response.into_parts();
    let mut enveloped = ApiError::from_status(status).into_response();
    *enveloped.status_mut() = status;

    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            enveloped.headers_mut().append(name.clone(), value.clone());
        }
    }
    enveloped
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{HeaderValue, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn bare(status: StatusCode, body: &'static str) -> Response {
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        response
    }

    #[tokio::test]
    async fn test_empty_timeout_is_enveloped() {
        let response = envelope_bare_errors(bare(StatusCode::REQUEST_TIMEOUT, "")).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "error": "Request timed out" })
        );
    }

    #[tokio::test]
    async fn test_plain_text_error_keeps_status_and_headers() {
        let mut response = bare(StatusCode::UNSUPPORTED_MEDIA_TYPE, "nope");
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        response
            .headers_mut()
            .insert("x-request-id", HeaderValue::from_static("req-1"));

        let response = envelope_bare_errors(response).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(response.headers()["x-request-id"], "req-1");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_json_and_success_responses_untouched() {
        let ok = envelope_bare_errors(bare(StatusCode::OK, "")).await;
        assert_eq!(ok.status(), StatusCode::OK);

        let already = envelope_bare_errors(ApiError::NotFound("Order x not found".into()).into_response()).await;
        assert_eq!(body_json(already).await["error"], "Order x not found");
    }
}
