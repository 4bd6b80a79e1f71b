//! Customer endpoints.

use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Path, State,
};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::routes::{parse_body, parse_id};
use crate::services::{Customer, CustomerInput};
use crate::validation::schemas;

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

/// `GET /api/customers`
pub async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Customer>>, ApiError> {
    let customers = state
        .customers
        .list_customers()
        .await
        .map_err(|e| state.service_error(e))?;

    Ok(ApiResponse::ok(customers))
}

/// `POST /api/customers`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<Customer>, ApiError> {
    let input: CustomerInput = parse_body(schemas::create_customer(), body)?;

    let customer = state
        .customers
        .create_customer(input)
        .await
        .map_err(|e| state.service_error(e))?;

    let message = format!("Cliente {} creado", customer.id);
    Ok(ApiResponse::ok_with_message(customer, message))
}

/// `GET /api/customers/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Customer>, ApiError> {
    let id = parse_id(path)?;
    let customer = state
        .customers
        .get_customer(&id)
        .await
        .map_err(|e| state.service_error(e))?;

    Ok(ApiResponse::ok(customer))
}

/// `PUT /api/customers/{id}`
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<Customer>, ApiError> {
    let id = parse_id(path)?;
    let input: CustomerInput = parse_body(schemas::update_customer(), body)?;

    let customer = state
        .customers
        .update_customer(&id, input)
        .await
        .map_err(|e| state.service_error(e))?;

    let message = format!("Cliente {} actualizado", id);
    Ok(ApiResponse::ok_with_message(customer, message))
}

/// `DELETE /api/customers/{id}`
pub async fn remove(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Deleted>, ApiError> {
    let id = parse_id(path)?;
    state
        .customers
        .delete_customer(&id)
        .await
        .map_err(|e| state.service_error(e))?;

    let message = format!("Cliente {} eliminado", id);
    Ok(ApiResponse::ok_with_message(Deleted { id }, message))
}
