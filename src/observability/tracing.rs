//! Per-request spans.
//!
//! Every request gets an `http_request` span carrying method, path and the
//! request ID assigned by `http::request`.

use axum::{body::Body, http::Request};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::http::request::RequestIdExt;

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request<Body>) -> Span>;

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request.headers().request_id(),
    )
}

pub fn http_trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http().make_span_with(make_span as fn(&Request<Body>) -> Span)
}
