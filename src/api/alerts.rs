//! Price alert endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::alerts;
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::types::alert::{AlertCheck, CreateAlertRequest, PriceAlert, UpdateAlertRequest};

#[derive(Debug, Deserialize)]
pub struct AlertListQuery {
    pub asset_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub price: f64,
}

fn not_found(symbol: &str, asset_type: &str) -> AppError {
    AppError::NotFound(format!("Alert {symbol}/{asset_type} not found"))
}

/// GET /priceAlerts?asset_type=
pub async fn list_alerts(
    State(state): State<AppState>,
    query: Result<Query<AlertListQuery>, QueryRejection>,
) -> Result<Json<Vec<PriceAlert>>, AppError> {
    let Query(query) = query?;
    let asset_type = query.asset_type.filter(|t| !t.is_empty());
    let alerts = state.store.list_alerts(asset_type.as_deref()).await?;
    Ok(Json(alerts))
}

/// POST /priceAlerts
pub async fn create_alert(
    State(state): State<AppState>,
    payload: Result<Json<CreateAlertRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let alert = alerts::validate_new_alert(req)?;
    state.store.upsert_alert(&alert).await?;
    tracing::info!(
        symbol = %alert.symbol,
        asset_type = %alert.asset_type,
        operator = alert.operator.as_str(),
        price = alert.alert_price,
        "alert upserted"
    );
    Ok(Json(json!({ "message": "Alert created successfully" })))
}

/// PUT /priceAlerts/{symbol}/{asset_type}
pub async fn update_alert(
    State(state): State<AppState>,
    Path((symbol, asset_type)): Path<(String, String)>,
    payload: Result<Json<UpdateAlertRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let patch = alerts::plan_update(&symbol, &asset_type, &req);
    if !state.store.update_alert(&symbol, &asset_type, &patch).await? {
        return Err(not_found(&symbol, &asset_type));
    }
    Ok(Json(json!({ "message": "Alert updated successfully" })))
}

/// DELETE /priceAlerts/{symbol}/{asset_type}
pub async fn delete_alert(
    State(state): State<AppState>,
    Path((symbol, asset_type)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete_alert(&symbol, &asset_type).await? {
        return Err(not_found(&symbol, &asset_type));
    }
    Ok(Json(json!({ "message": "Alert deleted successfully" })))
}

/// GET /priceAlerts/{symbol}/{asset_type}/check?price=
/// Read-only: reports whether the stored alert fires at `price`.
pub async fn check_alert(
    State(state): State<AppState>,
    Path((symbol, asset_type)): Path<(String, String)>,
    query: Result<Query<CheckQuery>, QueryRejection>,
) -> Result<Json<AlertCheck>, AppError> {
    let Query(query) = query?;
    let alert = state
        .store
        .get_alert(&symbol, &asset_type)
        .await?
        .ok_or_else(|| not_found(&symbol, &asset_type))?;
    Ok(Json(alerts::check(alert, query.price)))
}
