use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The externally populated "potential" lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchlistKind {
    Stocks,
    World,
    Crypto,
    Forex,
}

impl WatchlistKind {
    pub(crate) fn table(self) -> &'static str {
        match self {
            WatchlistKind::Stocks => "symbols_watchlist",
            WatchlistKind::World => "world_symbols_watchlist",
            WatchlistKind::Crypto => "cryptos_watchlist",
            WatchlistKind::Forex => "forex_watchlist",
        }
    }

    pub(crate) fn key_column(self) -> &'static str {
        match self {
            WatchlistKind::Stocks | WatchlistKind::World => "symbol",
            WatchlistKind::Crypto => "crypto",
            WatchlistKind::Forex => "pair",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SymbolData {
    pub symbol: String,
    pub highest_price: f64,
    pub lowest_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorldSymbolData {
    pub symbol: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CryptoData {
    pub crypto: String,
    pub is_ath: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ForexPair {
    pub pair: String,
    pub action: String,
    pub score_diff: f64,
    pub note: String,
    pub updated_at: DateTime<Utc>,
}

/// Listing envelope shared by every watchlist endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistResponse<T> {
    pub data: Vec<T>,
    pub latest_updated: Option<DateTime<Utc>>,
}
