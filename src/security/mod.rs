//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (CorsLayer on the API router, origin allow-list)
//!     → api_key.rs (credential check for protected routes)
//!     → Pass to route handler
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing secret rejects every protected request
//! - Constant-time credential comparison
//! - Policies are plain values built once from config; middleware only wires them

pub mod api_key;
pub mod cors;

pub use api_key::{ApiKeyAuthenticator, AuthError, API_KEY_HEADER};
pub use cors::CorsPolicy;
