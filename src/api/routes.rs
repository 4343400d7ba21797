use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{alerts, trades, watchlists};
use crate::store::SharedStore;

/// Shared handler state. Holds no derived data: every request re-reads the store.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

async fn health() -> &'static str {
    "OK"
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/getPotentialSymbols", get(watchlists::get_potential_symbols))
        .route(
            "/getPotentialWorldSymbols",
            get(watchlists::get_potential_world_symbols),
        )
        .route("/getPotentialCoins", get(watchlists::get_potential_coins))
        .route("/getPotentialForexPairs", get(watchlists::get_potential_forex_pairs))
        .route("/userTrade", post(trades::user_trade))
        .route("/getUserTrade", get(trades::get_user_trade))
        .route("/updateTradingSignal", post(trades::update_trading_signal))
        .route(
            "/priceAlerts",
            get(alerts::list_alerts).post(alerts::create_alert),
        )
        .route(
            "/priceAlerts/{symbol}/{asset_type}",
            put(alerts::update_alert).delete(alerts::delete_alert),
        )
        .route(
            "/priceAlerts/{symbol}/{asset_type}/check",
            get(alerts::check_alert),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
