//! Order endpoints.

use axum::extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    Path, Query, State,
};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::http::error::ApiError;
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::routes::{parse_body, parse_id, parse_query};
use crate::services::{NewOrder, Order, OrderFilter, OrderStatus};
use crate::validation::schemas;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCardsRequest {
    pub card_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// `GET /api/orders?status=&customerId=`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<ApiResponse<Vec<Order>>, ApiError> {
    let filter: OrderFilter = parse_query(schemas::list_orders(), query)?;

    let orders = state
        .orders
        .list_orders(filter)
        .await
        .map_err(|e| state.service_error(e))?;

    Ok(ApiResponse::ok(orders))
}

/// `POST /api/orders`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<Order>, ApiError> {
    let new_order: NewOrder = parse_body(schemas::create_order(), body)?;

    let order = state
        .orders
        .create_order(new_order)
        .await
        .map_err(|e| state.service_error(e))?;

    tracing::info!(order = %order.uuid, "Order created");
    let message = format!("Orden {} creada", order.uuid);
    Ok(ApiResponse::ok_with_message(order, message))
}

/// `GET /api/orders/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Order>, ApiError> {
    let id = parse_id(path)?;
    let order = state
        .orders
        .get_order(&id)
        .await
        .map_err(|e| state.service_error(e))?;

    Ok(ApiResponse::ok(order))
}

/// `PUT /api/orders/{id}/status`
pub async fn update_status(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<Order>, ApiError> {
    let id = parse_id(path)?;
    let StatusUpdate { status } = parse_body(schemas::update_order_status(), body)?;

    let order = state
        .orders
        .update_status(&id, status)
        .await
        .map_err(|e| state.service_error(e))?;

    let message = format!("Orden {} actualizada a {}", id, status.as_str());
    Ok(ApiResponse::ok_with_message(order, message))
}

/// `POST /api/orders/{id}/assign-cards`
pub async fn assign_cards(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<Order>, ApiError> {
    let id = parse_id(path)?;
    let AssignCardsRequest { card_ids } = parse_body(schemas::assign_cards(), body)?;
    let count = card_ids.len();

    let order = state
        .orders
        .assign_cards(&id, card_ids)
        .await
        .map_err(|e| state.service_error(e))?;

    tracing::info!(order = %id, cards = count, "Cards assigned");
    let message = format!("{} cartas asignadas a la orden {}", count, id);
    Ok(ApiResponse::ok_with_message(order, message))
}
