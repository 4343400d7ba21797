//! In-process store. Used by tests and when no `DATABASE_URL` is configured.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::Store;
use crate::alerts::{self, AlertPatch};
use crate::error::AppError;
use crate::types::alert::{NewAlert, PriceAlert};
use crate::types::position::{Position, Price, SignalUpdate, StockEntry};
use crate::types::watchlist::{
    CryptoData, ForexPair, SymbolData, WatchlistKind, WatchlistResponse, WorldSymbolData,
};

type PositionKey = (String, String);
type AlertKey = (String, String);

#[derive(Default)]
struct Tables {
    positions: HashMap<PositionKey, Position>,
    symbols: Vec<SymbolData>,
    world_symbols: Vec<WorldSymbolData>,
    coins: Vec<CryptoData>,
    forex: Vec<ForexPair>,
    watchlist_updated: HashMap<WatchlistKind, DateTime<Utc>>,
    alerts: HashMap<AlertKey, PriceAlert>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stands in for the external price feed.
    pub async fn set_current_price(&self, user_id: &str, symbol: &str, price: Price) -> bool {
        let mut guard = self.inner.write().await;
        match guard.positions.get_mut(&(user_id.to_string(), symbol.to_string())) {
            Some(pos) => {
                pos.current_price = price;
                true
            }
            None => false,
        }
    }

    /// Stands in for the external ingestion job: replaces the stock watchlist.
    pub async fn set_potential_symbols(&self, rows: Vec<SymbolData>) {
        let mut guard = self.inner.write().await;
        guard.symbols = rows;
        guard.watchlist_updated.insert(WatchlistKind::Stocks, Utc::now());
    }

    pub async fn set_potential_world_symbols(&self, rows: Vec<WorldSymbolData>) {
        let mut guard = self.inner.write().await;
        guard.world_symbols = rows;
        guard.watchlist_updated.insert(WatchlistKind::World, Utc::now());
    }

    pub async fn set_potential_coins(&self, rows: Vec<CryptoData>) {
        let mut guard = self.inner.write().await;
        guard.coins = rows;
        guard.watchlist_updated.insert(WatchlistKind::Crypto, Utc::now());
    }

    pub async fn set_potential_forex_pairs(&self, rows: Vec<ForexPair>) {
        let mut guard = self.inner.write().await;
        guard.forex = rows;
    }

    /// Stands in for the external dispatcher, the only writer of this field.
    pub async fn set_last_notified(
        &self,
        symbol: &str,
        asset_type: &str,
        at: Option<DateTime<Utc>>,
    ) -> bool {
        let mut guard = self.inner.write().await;
        match guard.alerts.get_mut(&(symbol.to_string(), asset_type.to_string())) {
            Some(alert) => {
                alert.last_notified_at = at;
                true
            }
            None => false,
        }
    }

    pub async fn get_position(&self, user_id: &str, symbol: &str) -> Option<Position> {
        let guard = self.inner.read().await;
        guard
            .positions
            .get(&(user_id.to_string(), symbol.to_string()))
            .cloned()
    }
}

fn new_position(user_id: &str, symbol: &str) -> Position {
    Position {
        user_id: user_id.to_string(),
        symbol: symbol.to_string(),
        entry_price: 0,
        avg_price: 0,
        current_price: 0,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert_entry_prices(
        &self,
        user_id: &str,
        stocks: &[StockEntry],
    ) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        for stock in stocks {
            guard
                .positions
                .entry((user_id.to_string(), stock.symbol.clone()))
                .or_insert_with(|| new_position(user_id, &stock.symbol))
                .entry_price = stock.entry_price;
        }
        Ok(())
    }

    async fn delete_positions(&self, user_id: &str, symbols: &[String]) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        for symbol in symbols {
            guard.positions.remove(&(user_id.to_string(), symbol.clone()));
        }
        Ok(())
    }

    async fn apply_signal_updates(&self, updates: &[SignalUpdate]) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        for update in updates {
            guard
                .positions
                .entry((update.user_id.clone(), update.symbol.clone()))
                .or_insert_with(|| new_position(&update.user_id, &update.symbol))
                .avg_price = update.break_even_price;
        }
        Ok(())
    }

    async fn list_positions(&self, user_id: &str) -> Result<Vec<Position>, AppError> {
        let guard = self.inner.read().await;
        let mut rows: Vec<Position> = guard
            .positions
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(rows)
    }

    async fn watchlist_symbols(&self, kind: WatchlistKind) -> Result<HashSet<String>, AppError> {
        let guard = self.inner.read().await;
        let set: HashSet<String> = match kind {
            WatchlistKind::Stocks => guard.symbols.iter().map(|s| s.symbol.clone()).collect(),
            WatchlistKind::World => guard.world_symbols.iter().map(|s| s.symbol.clone()).collect(),
            WatchlistKind::Crypto => guard.coins.iter().map(|c| c.crypto.clone()).collect(),
            WatchlistKind::Forex => guard.forex.iter().map(|f| f.pair.clone()).collect(),
        };
        Ok(set)
    }

    async fn potential_symbols(&self) -> Result<WatchlistResponse<SymbolData>, AppError> {
        let guard = self.inner.read().await;
        Ok(WatchlistResponse {
            data: guard.symbols.clone(),
            latest_updated: guard.watchlist_updated.get(&WatchlistKind::Stocks).copied(),
        })
    }

    async fn potential_world_symbols(
        &self,
    ) -> Result<WatchlistResponse<WorldSymbolData>, AppError> {
        let guard = self.inner.read().await;
        Ok(WatchlistResponse {
            data: guard.world_symbols.clone(),
            latest_updated: guard.watchlist_updated.get(&WatchlistKind::World).copied(),
        })
    }

    async fn potential_coins(&self) -> Result<WatchlistResponse<CryptoData>, AppError> {
        let guard = self.inner.read().await;
        let mut data = guard.coins.clone();
        data.sort_by(|a, b| a.is_ath.cmp(&b.is_ath));
        Ok(WatchlistResponse {
            data,
            latest_updated: guard.watchlist_updated.get(&WatchlistKind::Crypto).copied(),
        })
    }

    async fn potential_forex_pairs(&self) -> Result<WatchlistResponse<ForexPair>, AppError> {
        let guard = self.inner.read().await;
        let mut data = guard.forex.clone();
        data.sort_by(|a, b| b.score_diff.total_cmp(&a.score_diff));
        let latest_updated = data.iter().map(|f| f.updated_at).max();
        Ok(WatchlistResponse {
            data,
            latest_updated,
        })
    }

    async fn list_alerts(&self, asset_type: Option<&str>) -> Result<Vec<PriceAlert>, AppError> {
        let guard = self.inner.read().await;
        let mut rows: Vec<PriceAlert> = guard
            .alerts
            .values()
            .filter(|a| asset_type.is_none_or(|t| a.asset_type == t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_alert(
        &self,
        symbol: &str,
        asset_type: &str,
    ) -> Result<Option<PriceAlert>, AppError> {
        let guard = self.inner.read().await;
        Ok(guard
            .alerts
            .get(&(symbol.to_string(), asset_type.to_string()))
            .cloned())
    }

    async fn upsert_alert(&self, alert: &NewAlert) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        let key = (alert.symbol.clone(), alert.asset_type.clone());
        let merged = alerts::upsert_into(guard.alerts.get(&key), alert, Utc::now());
        guard.alerts.insert(key, merged);
        Ok(())
    }

    async fn update_alert(
        &self,
        symbol: &str,
        asset_type: &str,
        patch: &AlertPatch,
    ) -> Result<bool, AppError> {
        let mut guard = self.inner.write().await;
        match guard.alerts.get_mut(&(symbol.to_string(), asset_type.to_string())) {
            Some(alert) => {
                patch.apply(alert, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_alert(&self, symbol: &str, asset_type: &str) -> Result<bool, AppError> {
        let mut guard = self.inner.write().await;
        Ok(guard
            .alerts
            .remove(&(symbol.to_string(), asset_type.to_string()))
            .is_some())
    }
}
