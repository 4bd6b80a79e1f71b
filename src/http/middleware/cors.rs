//! Preflight accounting.
//!
//! Runs just outside the `CorsLayer` on the API router, which answers the
//! preflight itself; this hook only records the outcome.

use axum::{body::Body, extract::State, http::{Method, Request}};
use std::sync::Arc;

use crate::observability::metrics;
use crate::security::CorsPolicy;

pub async fn count_preflight(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request<Body>,
) -> Request<Body> {
    if request.method() == Method::OPTIONS {
        let allowed = policy.is_allowed(request.headers());
        tracing::debug!(path = %request.uri().path(), allowed, "Answering CORS preflight");
        metrics::record_preflight(allowed);
    }
    request
}
