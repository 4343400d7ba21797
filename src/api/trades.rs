//! Position mutation and signal endpoints.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::routes::AppState;
use crate::batch;
use crate::error::AppError;
use crate::signals;
use crate::types::position::{SignalUpdate, UserTradeRequest, UserTradeResponse};
use crate::types::watchlist::WatchlistKind;

#[derive(Debug, Deserialize)]
pub struct UserTradeQuery {
    pub user_id: Option<String>,
}

/// POST /userTrade
pub async fn user_trade(
    State(state): State<AppState>,
    payload: Result<Json<UserTradeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    batch::apply_trade_batch(state.store.as_ref(), &req).await?;
    Ok(Json(json!({ "message": "Operation completed successfully" })))
}

/// GET /getUserTrade?user_id=
pub async fn get_user_trade(
    State(state): State<AppState>,
    query: Result<Query<UserTradeQuery>, QueryRejection>,
) -> Result<Json<Vec<UserTradeResponse>>, AppError> {
    let Query(query) = query?;
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Invalid user_id parameter".to_string()))?;

    // Two independent reads; a concurrent write between them is tolerated.
    let watchlist = state.store.watchlist_symbols(WatchlistKind::Stocks).await?;
    let positions = state.store.list_positions(&user_id).await?;

    Ok(Json(signals::evaluate_positions(&positions, &watchlist)))
}

/// POST /updateTradingSignal
pub async fn update_trading_signal(
    State(state): State<AppState>,
    payload: Result<Json<Vec<SignalUpdate>>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(updates) = payload?;
    batch::apply_signal_batch(state.store.as_ref(), &updates).await?;
    Ok(Json(json!({ "message": "Portfolio updated successfully" })))
}
