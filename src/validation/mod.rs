//! Request validation subsystem.
//!
//! # Data Flow
//! ```text
//! JSON body / query parameters (untyped)
//!     → schemas.rs (named schema for the endpoint)
//!     → schema.rs (check every field rule, collect violations)
//!     → typed input | ValidationErrors (→ 400)
//! ```
//!
//! # Design Decisions
//! - All violations are reported, in declaration order
//! - No coercion: a query-string "5" is not an integer
//! - Same input always yields the same error list

pub mod schema;
pub mod schemas;

pub use schema::{query_to_value, Constraint, FieldError, Schema, ValidationErrors};
