//! API-key middleware for protected routes.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::http::error::ApiError;
use crate::http::request::RequestIdExt;
use crate::observability::metrics;
use crate::security::ApiKeyAuthenticator;

/// Reject the request with 401 unless it carries the configured key.
/// Runs before any extractor, so rejected requests never reach a service.
pub async fn api_key_middleware(
    State(auth): State<Arc<ApiKeyAuthenticator>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match auth.authenticate(request.headers(), request.uri().query()) {
        Ok(()) => next.run(request).await,
        Err(reason) => {
            tracing::warn!(
                request_id = %request.headers().request_id(),
                path = %request.uri().path(),
                reason = reason.reason(),
                "Rejected unauthenticated request"
            );
            metrics::record_auth_failure(reason.reason());
            ApiError::Unauthorized.into_response()
        }
    }
}
