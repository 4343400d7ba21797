//! Position persistence: trade upserts/deletes, bulk signal upsert, listing.

use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::types::position::{Position, SignalUpdate, StockEntry};

#[derive(Debug, FromRow)]
pub struct PositionRow {
    pub user_id: String,
    pub symbol: String,
    pub entry_price: i64,
    pub avg_price: i64,
    pub current_price: i64,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Position {
            user_id: row.user_id,
            symbol: row.symbol,
            entry_price: row.entry_price,
            avg_price: row.avg_price,
            current_price: row.current_price,
        }
    }
}

/// Upsert `entry_price` for every stock in one transaction; any failure rolls
/// back the whole batch.
pub async fn upsert_entry_prices(
    pool: &PgPool,
    user_id: &str,
    stocks: &[StockEntry],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for stock in stocks {
        sqlx::query(
            "INSERT INTO user_trading_symbols (user_id, symbol, entry_price, avg_price) \
             VALUES ($1, $2, $3, 0) \
             ON CONFLICT (user_id, symbol) DO UPDATE SET entry_price = EXCLUDED.entry_price",
        )
        .bind(user_id)
        .bind(&stock.symbol)
        .bind(stock.entry_price)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Delete positions by symbol in one transaction.
pub async fn delete_positions(
    pool: &PgPool,
    user_id: &str,
    symbols: &[String],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for symbol in symbols {
        sqlx::query("DELETE FROM user_trading_symbols WHERE user_id = $1 AND symbol = $2")
            .bind(user_id)
            .bind(symbol)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Bulk upsert that only ever overwrites `avg_price`. Columns are bound as
/// three arrays, so the bind count stays at three whatever the batch size.
/// Keys must be distinct: Postgres refuses to update the same row twice in
/// one statement.
pub fn signal_upsert_query(updates: &[SignalUpdate]) -> QueryBuilder<'static, Postgres> {
    let user_ids: Vec<String> = updates.iter().map(|u| u.user_id.clone()).collect();
    let symbols: Vec<String> = updates.iter().map(|u| u.symbol.clone()).collect();
    let prices: Vec<i64> = updates.iter().map(|u| u.break_even_price).collect();

    let mut qb = QueryBuilder::new(
        "INSERT INTO user_trading_symbols (user_id, symbol, entry_price, avg_price) \
         SELECT u, s, 0, p FROM UNNEST(",
    );
    qb.push_bind(user_ids)
        .push("::text[], ")
        .push_bind(symbols)
        .push("::text[], ")
        .push_bind(prices)
        .push("::bigint[]) AS t(u, s, p)");
    qb.push(" ON CONFLICT (user_id, symbol) DO UPDATE SET avg_price = EXCLUDED.avg_price");
    qb
}

pub async fn apply_signal_updates(
    pool: &PgPool,
    updates: &[SignalUpdate],
) -> Result<(), sqlx::Error> {
    if updates.is_empty() {
        return Ok(());
    }
    signal_upsert_query(updates).build().execute(pool).await?;
    Ok(())
}

/// List a user's positions (for GET /getUserTrade).
pub async fn list_positions_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<Position>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PositionRow>(
        "SELECT user_id, symbol, entry_price, avg_price, current_price \
         FROM user_trading_symbols WHERE user_id = $1 ORDER BY symbol",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Position::from).collect())
}
