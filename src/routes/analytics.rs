//! Analytics endpoints.

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;
use std::collections::HashMap;

use crate::http::error::ApiError;
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::routes::parse_query;
use crate::services::{AdminAnalytics, DashboardStats, Period};
use crate::validation::schemas;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQuery {
    #[serde(default)]
    pub period: Period,
    pub store_id: Option<String>,
}

/// `GET /api/analytics/dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<ApiResponse<DashboardStats>, ApiError> {
    let stats = state
        .analytics
        .dashboard_stats()
        .await
        .map_err(|e| state.service_error(e))?;

    Ok(ApiResponse::ok(stats))
}

/// `GET /api/analytics/admin?period=&storeId=`
pub async fn admin(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<ApiResponse<AdminAnalytics>, ApiError> {
    let AdminQuery { period, store_id } = parse_query(schemas::admin_analytics(), query)?;

    let report = state
        .analytics
        .admin_analytics(period, store_id)
        .await
        .map_err(|e| state.service_error(e))?;

    Ok(ApiResponse::ok(report))
}
