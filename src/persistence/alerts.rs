//! Price alert persistence: list, upsert, partial update, delete.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::alerts::AlertPatch;
use crate::types::alert::{AlertOperator, NewAlert, PriceAlert};

const ALERT_COLUMNS: &str = "symbol, asset_type, alert_price, operator, is_active, \
                             last_notified_at, created_at, updated_at";

#[derive(Debug, FromRow)]
pub struct AlertRow {
    pub symbol: String,
    pub asset_type: String,
    pub alert_price: f64,
    pub operator: String,
    pub is_active: bool,
    pub last_notified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rows with an operator outside the two literals are skipped.
pub fn alert_row_to_alert(row: AlertRow) -> Option<PriceAlert> {
    let operator = AlertOperator::parse(&row.operator)?;
    Some(PriceAlert {
        symbol: row.symbol,
        asset_type: row.asset_type,
        alert_price: row.alert_price,
        operator,
        is_active: row.is_active,
        last_notified_at: row.last_notified_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_alerts(rows: Vec<AlertRow>) -> Vec<PriceAlert> {
    rows.into_iter()
        .filter_map(|row| {
            let key = (row.symbol.clone(), row.asset_type.clone());
            let alert = alert_row_to_alert(row);
            if alert.is_none() {
                tracing::warn!(symbol = %key.0, asset_type = %key.1, "skipping alert row with unknown operator");
            }
            alert
        })
        .collect()
}

/// List alerts, newest first, optionally filtered by asset type.
pub async fn list_alerts(
    pool: &PgPool,
    asset_type: Option<&str>,
) -> Result<Vec<PriceAlert>, sqlx::Error> {
    let rows = if let Some(asset_type) = asset_type {
        sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {ALERT_COLUMNS} FROM price_alerts WHERE asset_type = $1 ORDER BY created_at DESC"
        ))
        .bind(asset_type)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {ALERT_COLUMNS} FROM price_alerts ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?
    };
    Ok(rows_to_alerts(rows))
}

pub async fn get_alert(
    pool: &PgPool,
    symbol: &str,
    asset_type: &str,
) -> Result<Option<PriceAlert>, sqlx::Error> {
    let row = sqlx::query_as::<_, AlertRow>(&format!(
        "SELECT {ALERT_COLUMNS} FROM price_alerts WHERE symbol = $1 AND asset_type = $2"
    ))
    .bind(symbol)
    .bind(asset_type)
    .fetch_optional(pool)
    .await?;
    Ok(row.and_then(alert_row_to_alert))
}

/// Insert, or reactivate and overwrite on (symbol, asset_type) conflict.
pub async fn upsert_alert(pool: &PgPool, alert: &NewAlert) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO price_alerts (symbol, asset_type, alert_price, operator, is_active) \
         VALUES ($1, $2, $3, $4, TRUE) \
         ON CONFLICT (symbol, asset_type) DO UPDATE \
         SET alert_price = EXCLUDED.alert_price, operator = EXCLUDED.operator, \
             is_active = TRUE, updated_at = NOW()",
    )
    .bind(&alert.symbol)
    .bind(&alert.asset_type)
    .bind(alert.alert_price)
    .bind(alert.operator.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

/// `UPDATE` touching only the patched columns; `updated_at` always moves.
pub fn alert_update_query<'a>(
    symbol: &'a str,
    asset_type: &'a str,
    patch: &AlertPatch,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE price_alerts SET updated_at = NOW()");
    if let Some(price) = patch.alert_price {
        qb.push(", alert_price = ").push_bind(price);
    }
    if let Some(op) = patch.operator {
        qb.push(", operator = ").push_bind(op.as_str());
    }
    if let Some(active) = patch.is_active {
        qb.push(", is_active = ").push_bind(active);
    }
    qb.push(" WHERE symbol = ")
        .push_bind(symbol)
        .push(" AND asset_type = ")
        .push_bind(asset_type);
    qb
}

/// Returns whether a row matched.
pub async fn update_alert(
    pool: &PgPool,
    symbol: &str,
    asset_type: &str,
    patch: &AlertPatch,
) -> Result<bool, sqlx::Error> {
    let result = alert_update_query(symbol, asset_type, patch)
        .build()
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Returns whether a row matched.
pub async fn delete_alert(
    pool: &PgPool,
    symbol: &str,
    asset_type: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM price_alerts WHERE symbol = $1 AND asset_type = $2")
        .bind(symbol)
        .bind(asset_type)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
