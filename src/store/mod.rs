//! Storage contracts for positions, watchlists and price alerts.
//!
//! Every call re-reads current state; nothing derived is cached. Each method
//! is one store-level unit: batch writes either land entirely or not at all.

mod memory;

pub use memory::MemoryStore;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::alerts::AlertPatch;
use crate::error::AppError;
use crate::types::alert::{NewAlert, PriceAlert};
use crate::types::position::{Position, SignalUpdate, StockEntry};
use crate::types::watchlist::{
    CryptoData, ForexPair, SymbolData, WatchlistKind, WatchlistResponse, WorldSymbolData,
};

pub type SharedStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Trade Add/Update: upsert `entry_price` only. New rows start with
    /// `avg_price = 0`.
    async fn upsert_entry_prices(&self, user_id: &str, stocks: &[StockEntry])
        -> Result<(), AppError>;

    /// Trade Delete. Missing keys are not an error.
    async fn delete_positions(&self, user_id: &str, symbols: &[String]) -> Result<(), AppError>;

    /// Signal update: upsert `avg_price` only. Callers pass a batch already
    /// collapsed to one row per key.
    async fn apply_signal_updates(&self, updates: &[SignalUpdate]) -> Result<(), AppError>;

    async fn list_positions(&self, user_id: &str) -> Result<Vec<Position>, AppError>;

    async fn watchlist_symbols(&self, kind: WatchlistKind) -> Result<HashSet<String>, AppError>;

    async fn potential_symbols(&self) -> Result<WatchlistResponse<SymbolData>, AppError>;
    async fn potential_world_symbols(&self)
        -> Result<WatchlistResponse<WorldSymbolData>, AppError>;
    async fn potential_coins(&self) -> Result<WatchlistResponse<CryptoData>, AppError>;
    async fn potential_forex_pairs(&self) -> Result<WatchlistResponse<ForexPair>, AppError>;

    /// Newest first, optionally filtered by asset type.
    async fn list_alerts(&self, asset_type: Option<&str>) -> Result<Vec<PriceAlert>, AppError>;

    async fn get_alert(&self, symbol: &str, asset_type: &str)
        -> Result<Option<PriceAlert>, AppError>;

    /// Insert, or on (symbol, asset_type) conflict overwrite price/operator
    /// and reactivate.
    async fn upsert_alert(&self, alert: &NewAlert) -> Result<(), AppError>;

    /// Returns false when no alert matched the key.
    async fn update_alert(
        &self,
        symbol: &str,
        asset_type: &str,
        patch: &AlertPatch,
    ) -> Result<bool, AppError>;

    /// Returns false when no alert matched the key.
    async fn delete_alert(&self, symbol: &str, asset_type: &str) -> Result<bool, AppError>;
}
