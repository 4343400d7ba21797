use axum::{Json, extract::State};

use crate::api::routes::AppState;
use crate::error::AppError;
use crate::types::watchlist::{
    CryptoData, ForexPair, SymbolData, WatchlistResponse, WorldSymbolData,
};

pub async fn get_potential_symbols(
    State(state): State<AppState>,
) -> Result<Json<WatchlistResponse<SymbolData>>, AppError> {
    Ok(Json(state.store.potential_symbols().await?))
}

pub async fn get_potential_world_symbols(
    State(state): State<AppState>,
) -> Result<Json<WatchlistResponse<WorldSymbolData>>, AppError> {
    Ok(Json(state.store.potential_world_symbols().await?))
}

pub async fn get_potential_coins(
    State(state): State<AppState>,
) -> Result<Json<WatchlistResponse<CryptoData>>, AppError> {
    Ok(Json(state.store.potential_coins().await?))
}

pub async fn get_potential_forex_pairs(
    State(state): State<AppState>,
) -> Result<Json<WatchlistResponse<ForexPair>>, AppError> {
    Ok(Json(state.store.potential_forex_pairs().await?))
}
