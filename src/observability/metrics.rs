//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//! - `api_auth_failures_total` (counter): rejected credentials by reason
//! - `api_validation_failures_total` (counter): rejected inputs by schema
//! - `api_service_errors_total` (counter): domain failures by kind
//! - `api_cors_preflight_total` (counter): answered preflights by outcome

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("api_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_auth_failure(reason: &'static str) {
    ::metrics::counter!("api_auth_failures_total", "reason" => reason).increment(1);
}

pub fn record_validation_failure(schema: &'static str) {
    ::metrics::counter!("api_validation_failures_total", "schema" => schema).increment(1);
}

pub fn record_service_error(kind: &'static str) {
    ::metrics::counter!("api_service_errors_total", "kind" => kind).increment(1);
}

pub fn record_preflight(allowed: bool) {
    let outcome = if allowed { "allowed" } else { "rejected" };
    ::metrics::counter!("api_cors_preflight_total", "outcome" => outcome).increment(1);
}
