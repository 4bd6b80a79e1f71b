//! Cross-cutting request middleware.
//!
//! Applied outermost → innermost:
//! `envelope` → (timeout, body limit) → `metrics` → (per API router)
//! `cors` preflight count → `CorsLayer` → `auth` → route handler

pub mod auth;
pub mod cors;
pub mod envelope;
pub mod metrics;

pub use auth::api_key_middleware;
pub use cors::count_preflight;
pub use envelope::envelope_bare_errors;
pub use metrics::metrics_middleware;
