//! Card Grading API Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod security;
pub mod services;
pub mod validation;

pub use config::ApiConfig;
pub use http::{ApiError, ApiResponse, AppState, HttpServer};
pub use lifecycle::Shutdown;
