//! Database layer: pool, migrations, and PostgreSQL-backed `Store`.

mod alerts;
mod pool;
mod positions;
mod watchlists;

use std::collections::HashSet;

use async_trait::async_trait;

pub use alerts::{AlertRow, alert_row_to_alert, alert_update_query};
pub use pool::{create_pool_and_migrate, run_migrations};
pub use positions::{PositionRow, signal_upsert_query};
pub use sqlx::PgPool;

use crate::alerts::AlertPatch;
use crate::error::AppError;
use crate::store::Store;
use crate::types::alert::{NewAlert, PriceAlert};
use crate::types::position::{Position, SignalUpdate, StockEntry};
use crate::types::watchlist::{
    CryptoData, ForexPair, SymbolData, WatchlistKind, WatchlistResponse, WorldSymbolData,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn upsert_entry_prices(
        &self,
        user_id: &str,
        stocks: &[StockEntry],
    ) -> Result<(), AppError> {
        positions::upsert_entry_prices(&self.pool, user_id, stocks)
            .await
            .map_err(AppError::db("Operation failed"))
    }

    async fn delete_positions(&self, user_id: &str, symbols: &[String]) -> Result<(), AppError> {
        positions::delete_positions(&self.pool, user_id, symbols)
            .await
            .map_err(AppError::db("Operation failed"))
    }

    async fn apply_signal_updates(&self, updates: &[SignalUpdate]) -> Result<(), AppError> {
        positions::apply_signal_updates(&self.pool, updates)
            .await
            .map_err(AppError::db("Failed to update trading signals"))
    }

    async fn list_positions(&self, user_id: &str) -> Result<Vec<Position>, AppError> {
        positions::list_positions_for_user(&self.pool, user_id)
            .await
            .map_err(AppError::db("Failed to get user trades"))
    }

    async fn watchlist_symbols(&self, kind: WatchlistKind) -> Result<HashSet<String>, AppError> {
        watchlists::watchlist_symbols(&self.pool, kind)
            .await
            .map_err(AppError::db("Failed to query watchlist"))
    }

    async fn potential_symbols(&self) -> Result<WatchlistResponse<SymbolData>, AppError> {
        let data = watchlists::list_symbols(&self.pool)
            .await
            .map_err(AppError::db("Failed to query database"))?;
        let latest_updated = watchlists::latest_updated(&self.pool, WatchlistKind::Stocks)
            .await
            .map_err(AppError::db("Failed to query database"))?;
        Ok(WatchlistResponse {
            data,
            latest_updated,
        })
    }

    async fn potential_world_symbols(
        &self,
    ) -> Result<WatchlistResponse<WorldSymbolData>, AppError> {
        let data = watchlists::list_world_symbols(&self.pool)
            .await
            .map_err(AppError::db("Failed to query database"))?;
        let latest_updated = watchlists::latest_updated(&self.pool, WatchlistKind::World)
            .await
            .map_err(AppError::db("Failed to query database"))?;
        Ok(WatchlistResponse {
            data,
            latest_updated,
        })
    }

    async fn potential_coins(&self) -> Result<WatchlistResponse<CryptoData>, AppError> {
        let data = watchlists::list_coins(&self.pool)
            .await
            .map_err(AppError::db("Failed to query database"))?;
        let latest_updated = watchlists::latest_updated(&self.pool, WatchlistKind::Crypto)
            .await
            .map_err(AppError::db("Failed to query database"))?;
        Ok(WatchlistResponse {
            data,
            latest_updated,
        })
    }

    async fn potential_forex_pairs(&self) -> Result<WatchlistResponse<ForexPair>, AppError> {
        let data = watchlists::list_forex_pairs(&self.pool)
            .await
            .map_err(AppError::db("Failed to query database"))?;
        let latest_updated = data.iter().map(|f| f.updated_at).max();
        Ok(WatchlistResponse {
            data,
            latest_updated,
        })
    }

    async fn list_alerts(&self, asset_type: Option<&str>) -> Result<Vec<PriceAlert>, AppError> {
        alerts::list_alerts(&self.pool, asset_type)
            .await
            .map_err(AppError::db("Failed to get alerts"))
    }

    async fn get_alert(
        &self,
        symbol: &str,
        asset_type: &str,
    ) -> Result<Option<PriceAlert>, AppError> {
        alerts::get_alert(&self.pool, symbol, asset_type)
            .await
            .map_err(AppError::db("Failed to get alert"))
    }

    async fn upsert_alert(&self, alert: &NewAlert) -> Result<(), AppError> {
        alerts::upsert_alert(&self.pool, alert)
            .await
            .map_err(AppError::db("Failed to create alert"))
    }

    async fn update_alert(
        &self,
        symbol: &str,
        asset_type: &str,
        patch: &AlertPatch,
    ) -> Result<bool, AppError> {
        alerts::update_alert(&self.pool, symbol, asset_type, patch)
            .await
            .map_err(AppError::db("Failed to update alert"))
    }

    async fn delete_alert(&self, symbol: &str, asset_type: &str) -> Result<bool, AppError> {
        alerts::delete_alert(&self.pool, symbol, asset_type)
            .await
            .map_err(AppError::db("Failed to delete alert"))
    }
}
