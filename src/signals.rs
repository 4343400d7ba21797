//! Signal evaluation: watchlist membership -> label, plus percent change.
//! Pure; derived at read time and never persisted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::position::{Position, Price, UserTradeResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalLabel {
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "BUY AND HOLD")]
    BuyAndHold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalEvaluation {
    pub signal: SignalLabel,
    pub percent_change: f64,
}

/// `(current - avg) / avg`, or 0.0 unless both prices are positive.
pub fn percent_change(avg_price: Price, current_price: Price) -> f64 {
    if avg_price > 0 && current_price > 0 {
        (current_price - avg_price) as f64 / avg_price as f64
    } else {
        0.0
    }
}

/// Label depends only on membership; price never changes it.
pub fn evaluate(position: &Position, on_watchlist: bool) -> SignalEvaluation {
    let signal = if on_watchlist {
        SignalLabel::BuyAndHold
    } else {
        SignalLabel::Sell
    };
    SignalEvaluation {
        signal,
        percent_change: percent_change(position.avg_price, position.current_price),
    }
}

/// Join positions against the watchlist set in memory, preserving input order.
pub fn evaluate_positions(
    positions: &[Position],
    watchlist: &HashSet<String>,
) -> Vec<UserTradeResponse> {
    positions
        .iter()
        .map(|pos| {
            let eval = evaluate(pos, watchlist.contains(&pos.symbol));
            UserTradeResponse {
                symbol: pos.symbol.clone(),
                entry_price: pos.entry_price,
                signal: eval.signal,
                avg_price: pos.avg_price,
                current_price: pos.current_price,
                percent_change: eval.percent_change,
            }
        })
        .collect()
}
