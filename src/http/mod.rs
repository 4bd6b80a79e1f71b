//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → request.rs (request ID assigned and echoed)
//!     → middleware/ (metrics, CORS, API-key auth)
//!     → routes/ (validation, one service call)
//!     → response.rs / error.rs (envelope and status)
//!     → Send to client
//! ```

pub mod error;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::ApiResponse;
pub use server::{AppState, HttpServer};
