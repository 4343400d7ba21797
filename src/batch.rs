//! Bulk upsert coordination for trade and signal-update batches.
//!
//! Trade batches write `entry_price`, signal batches write `avg_price`; the
//! two paths never touch each other's column. Each batch reaches the store
//! as a single unit.

use std::collections::HashSet;

use crate::error::AppError;
use crate::store::Store;
use crate::types::position::{SignalUpdate, TradeOperator, UserTradeRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub operator: Option<TradeOperator>,
    pub rows: usize,
}

/// Keep only the last update per (user_id, symbol), in submission order of
/// the surviving rows.
pub fn collapse_last_wins(updates: &[SignalUpdate]) -> Vec<SignalUpdate> {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(updates.len());
    let mut kept: Vec<SignalUpdate> = updates
        .iter()
        .rev()
        .filter(|u| seen.insert((u.user_id.as_str(), u.symbol.as_str())))
        .cloned()
        .collect();
    kept.reverse();
    kept
}

pub async fn apply_trade_batch(
    store: &dyn Store,
    req: &UserTradeRequest,
) -> Result<BatchOutcome, AppError> {
    let operator = TradeOperator::parse(&req.operator)
        .ok_or_else(|| AppError::BadRequest("Invalid operator".to_string()))?;

    if !req.stocks.is_empty() {
        match operator {
            TradeOperator::Add | TradeOperator::Update => {
                store.upsert_entry_prices(&req.user_id, &req.stocks).await?
            }
            TradeOperator::Delete => {
                let symbols: Vec<String> = req.stocks.iter().map(|s| s.symbol.clone()).collect();
                store.delete_positions(&req.user_id, &symbols).await?
            }
        }
    }

    tracing::info!(
        user_id = %req.user_id,
        ?operator,
        rows = req.stocks.len(),
        "trade batch applied"
    );
    Ok(BatchOutcome {
        operator: Some(operator),
        rows: req.stocks.len(),
    })
}

pub async fn apply_signal_batch(
    store: &dyn Store,
    updates: &[SignalUpdate],
) -> Result<BatchOutcome, AppError> {
    if updates.is_empty() {
        return Ok(BatchOutcome {
            operator: None,
            rows: 0,
        });
    }

    let collapsed = collapse_last_wins(updates);
    if collapsed.len() != updates.len() {
        tracing::debug!(
            submitted = updates.len(),
            kept = collapsed.len(),
            "duplicate keys in signal batch collapsed"
        );
    }
    store.apply_signal_updates(&collapsed).await?;

    tracing::info!(rows = collapsed.len(), "signal batch applied");
    Ok(BatchOutcome {
        operator: None,
        rows: collapsed.len(),
    })
}
