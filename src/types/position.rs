use serde::{Deserialize, Serialize};

pub type Price = i64;

/// Stored position per (user_id, symbol). `current_price` is written by the
/// external price feed and only read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub user_id: String,
    pub symbol: String,
    pub entry_price: Price,
    pub avg_price: Price,
    pub current_price: Price,
}

/// Batch operator tag carried by a trade request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOperator {
    Add,
    Update,
    Delete,
}

impl TradeOperator {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Add" => Some(TradeOperator::Add),
            "Update" => Some(TradeOperator::Update),
            "Delete" => Some(TradeOperator::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub symbol: String,
    #[serde(default)]
    pub entry_price: Price,
}

/// Body of `POST /userTrade`. The operator stays a raw string so an unknown
/// tag can be rejected with a readable message instead of a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct UserTradeRequest {
    pub user_id: String,
    #[serde(default)]
    pub stocks: Vec<StockEntry>,
    pub operator: String,
}

/// One row of `POST /updateTradingSignal`; `break_even_price` lands in `avg_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalUpdate {
    pub user_id: String,
    pub symbol: String,
    pub break_even_price: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTradeResponse {
    pub symbol: String,
    pub entry_price: Price,
    pub signal: crate::signals::SignalLabel,
    pub avg_price: Price,
    pub current_price: Price,
    pub percent_change: f64,
}
