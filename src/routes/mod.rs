//! HTTP routes.
//!
//! Every protected handler follows the same sequence: the API-key middleware
//! has already run, the handler validates its input against a named schema,
//! calls exactly one service operation and wraps the outcome in the response
//! envelope.

pub mod analytics;
pub mod customers;
pub mod health;
pub mod orders;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::validation::Schema;

/// Routes mounted under the API prefix. Authentication is layered on by the server.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/analytics/dashboard", get(analytics::dashboard))
        .route("/analytics/admin", get(analytics::admin))
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/{id}", get(orders::get_one))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/orders/{id}/assign-cards", post(orders::assign_cards))
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/{id}",
            get(customers::get_one)
                .put(customers::update)
                .delete(customers::remove),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Unauthenticated routes outside the API prefix.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .method_not_allowed_fallback(method_not_allowed)
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Extract the `{id}` path segment.
pub(crate) fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Validate a JSON body against `schema` and convert it.
pub(crate) fn parse_body<T: DeserializeOwned>(
    schema: Schema,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|rejection| {
        metrics::record_validation_failure(schema.name());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Validation(rejection.body_text())
        }
    })?;
    validated(schema, |s| s.parse(value))
}

/// Validate query parameters against `schema` and convert them.
pub(crate) fn parse_query<T: DeserializeOwned>(
    schema: Schema,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<T, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        metrics::record_validation_failure(schema.name());
        ApiError::Validation(rejection.body_text())
    })?;
    validated(schema, |s| s.parse_query(&params))
}

fn validated<T, F>(schema: Schema, run: F) -> Result<T, ApiError>
where
    F: FnOnce(&Schema) -> Result<T, crate::validation::ValidationErrors>,
{
    run(&schema).map_err(|errors| {
        tracing::debug!(schema = schema.name(), violations = errors.len(), "Rejected invalid input");
        metrics::record_validation_failure(schema.name());
        ApiError::from(errors)
    })
}
