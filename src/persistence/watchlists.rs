//! Watchlist reads. The tables are populated by an external ingestion job.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::types::watchlist::{
    CryptoData, ForexPair, SymbolData, WatchlistKind, WorldSymbolData,
};

/// Symbols present in a watchlist, for membership tests.
pub async fn watchlist_symbols(
    pool: &PgPool,
    kind: WatchlistKind,
) -> Result<HashSet<String>, sqlx::Error> {
    let sql = format!("SELECT {} FROM {}", kind.key_column(), kind.table());
    let symbols = sqlx::query_scalar::<_, String>(&sql).fetch_all(pool).await?;
    Ok(symbols.into_iter().collect())
}

pub async fn latest_updated(
    pool: &PgPool,
    kind: WatchlistKind,
) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    let sql = format!("SELECT MAX(updated_at) FROM {}", kind.table());
    sqlx::query_scalar::<_, Option<DateTime<Utc>>>(&sql)
        .fetch_one(pool)
        .await
}

pub async fn list_symbols(pool: &PgPool) -> Result<Vec<SymbolData>, sqlx::Error> {
    sqlx::query_as::<_, SymbolData>(
        "SELECT symbol, highest_price, lowest_price FROM symbols_watchlist",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_world_symbols(pool: &PgPool) -> Result<Vec<WorldSymbolData>, sqlx::Error> {
    sqlx::query_as::<_, WorldSymbolData>("SELECT symbol, country FROM world_symbols_watchlist")
        .fetch_all(pool)
        .await
}

pub async fn list_coins(pool: &PgPool) -> Result<Vec<CryptoData>, sqlx::Error> {
    sqlx::query_as::<_, CryptoData>(
        "SELECT crypto, is_ath FROM cryptos_watchlist ORDER BY is_ath ASC",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_forex_pairs(pool: &PgPool) -> Result<Vec<ForexPair>, sqlx::Error> {
    sqlx::query_as::<_, ForexPair>(
        "SELECT pair, action, score_diff, COALESCE(note, '') AS note, updated_at \
         FROM forex_watchlist ORDER BY score_diff DESC",
    )
    .fetch_all(pool)
    .await
}
