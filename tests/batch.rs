//! Bulk upsert tests: idempotence, field isolation, last-wins collapse, SQL shape.

use portfolio_signals::alerts::AlertPatch;
use portfolio_signals::batch::{apply_signal_batch, apply_trade_batch, collapse_last_wins};
use portfolio_signals::error::AppError;
use portfolio_signals::persistence::{alert_update_query, signal_upsert_query};
use portfolio_signals::store::{MemoryStore, Store};
use portfolio_signals::types::alert::AlertOperator;
use portfolio_signals::types::position::{SignalUpdate, StockEntry, UserTradeRequest};

fn trade(user_id: &str, operator: &str, stocks: &[(&str, i64)]) -> UserTradeRequest {
    UserTradeRequest {
        user_id: user_id.to_string(),
        stocks: stocks
            .iter()
            .map(|(symbol, entry_price)| StockEntry {
                symbol: symbol.to_string(),
                entry_price: *entry_price,
            })
            .collect(),
        operator: operator.to_string(),
    }
}

fn signal(user_id: &str, symbol: &str, break_even_price: i64) -> SignalUpdate {
    SignalUpdate {
        user_id: user_id.to_string(),
        symbol: symbol.to_string(),
        break_even_price,
    }
}

// --- Trade batches ---

#[tokio::test]
async fn add_creates_with_zero_avg() {
    let store = MemoryStore::new();
    apply_trade_batch(&store, &trade("u1", "Add", &[("AAA", 100), ("BBB", 20)]))
        .await
        .unwrap();

    let aaa = store.get_position("u1", "AAA").await.unwrap();
    assert_eq!(aaa.entry_price, 100);
    assert_eq!(aaa.avg_price, 0);
    assert_eq!(aaa.current_price, 0);
    assert_eq!(store.list_positions("u1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn same_trade_batch_twice_is_idempotent() {
    let store = MemoryStore::new();
    let req = trade("u1", "Update", &[("AAA", 100), ("BBB", 20)]);

    apply_trade_batch(&store, &req).await.unwrap();
    let once = store.list_positions("u1").await.unwrap();
    apply_trade_batch(&store, &req).await.unwrap();
    let twice = store.list_positions("u1").await.unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn delete_removes_only_named_symbols() {
    let store = MemoryStore::new();
    apply_trade_batch(&store, &trade("u1", "Add", &[("AAA", 1), ("BBB", 2)]))
        .await
        .unwrap();
    apply_trade_batch(&store, &trade("u1", "Delete", &[("AAA", 0), ("NOPE", 0)]))
        .await
        .unwrap();

    let left = store.list_positions("u1").await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].symbol, "BBB");
}

#[tokio::test]
async fn unknown_operator_rejected_without_writing() {
    let store = MemoryStore::new();
    let err = apply_trade_batch(&store, &trade("u1", "add", &[("AAA", 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid operator"));
    assert!(store.list_positions("u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn users_do_not_share_positions() {
    let store = MemoryStore::new();
    apply_trade_batch(&store, &trade("u1", "Add", &[("AAA", 1)])).await.unwrap();
    apply_trade_batch(&store, &trade("u2", "Add", &[("AAA", 9)])).await.unwrap();

    assert_eq!(store.get_position("u1", "AAA").await.unwrap().entry_price, 1);
    assert_eq!(store.get_position("u2", "AAA").await.unwrap().entry_price, 9);
}

// --- Signal batches ---

#[tokio::test]
async fn signal_update_changes_only_avg_price() {
    let store = MemoryStore::new();
    apply_trade_batch(&store, &trade("u1", "Add", &[("AAA", 100)])).await.unwrap();
    store.set_current_price("u1", "AAA", 120).await;

    apply_signal_batch(&store, &[signal("u1", "AAA", 90)]).await.unwrap();

    let pos = store.get_position("u1", "AAA").await.unwrap();
    assert_eq!(pos.entry_price, 100);
    assert_eq!(pos.avg_price, 90);
    assert_eq!(pos.current_price, 120);
}

#[tokio::test]
async fn trade_update_changes_only_entry_price() {
    let store = MemoryStore::new();
    apply_signal_batch(&store, &[signal("u1", "AAA", 90)]).await.unwrap();
    apply_trade_batch(&store, &trade("u1", "Update", &[("AAA", 105)])).await.unwrap();

    let pos = store.get_position("u1", "AAA").await.unwrap();
    assert_eq!(pos.entry_price, 105);
    assert_eq!(pos.avg_price, 90);
}

#[tokio::test]
async fn signal_update_inserts_missing_rows() {
    let store = MemoryStore::new();
    apply_signal_batch(&store, &[signal("u1", "NEW", 42)]).await.unwrap();

    let pos = store.get_position("u1", "NEW").await.unwrap();
    assert_eq!(pos.entry_price, 0);
    assert_eq!(pos.avg_price, 42);
}

#[tokio::test]
async fn same_signal_batch_twice_is_idempotent() {
    let store = MemoryStore::new();
    let batch = vec![signal("u1", "AAA", 10), signal("u1", "BBB", 20)];

    apply_signal_batch(&store, &batch).await.unwrap();
    let once = store.list_positions("u1").await.unwrap();
    apply_signal_batch(&store, &batch).await.unwrap();
    assert_eq!(store.list_positions("u1").await.unwrap(), once);
}

#[tokio::test]
async fn duplicate_key_last_one_wins() {
    let store = MemoryStore::new();
    let outcome = apply_signal_batch(
        &store,
        &[signal("u1", "AAA", 10), signal("u1", "BBB", 5), signal("u1", "AAA", 30)],
    )
    .await
    .unwrap();

    assert_eq!(outcome.rows, 2);
    assert_eq!(store.get_position("u1", "AAA").await.unwrap().avg_price, 30);
    assert_eq!(store.get_position("u1", "BBB").await.unwrap().avg_price, 5);
}

#[tokio::test]
async fn empty_signal_batch_is_noop() {
    let store = MemoryStore::new();
    let outcome = apply_signal_batch(&store, &[]).await.unwrap();
    assert_eq!(outcome.rows, 0);
}

#[test]
fn collapse_keeps_last_occurrence_order() {
    let collapsed = collapse_last_wins(&[
        signal("u1", "AAA", 1),
        signal("u2", "AAA", 2),
        signal("u1", "AAA", 3),
        signal("u1", "BBB", 4),
    ]);
    assert_eq!(
        collapsed,
        vec![signal("u2", "AAA", 2), signal("u1", "AAA", 3), signal("u1", "BBB", 4)]
    );
}

// --- Generated SQL ---

#[test]
fn signal_upsert_binds_column_arrays() {
    let updates = vec![signal("u1", "AAA", 10), signal("u1", "BBB", 20)];
    let qb = signal_upsert_query(&updates);
    assert_eq!(
        qb.sql(),
        "INSERT INTO user_trading_symbols (user_id, symbol, entry_price, avg_price) \
         SELECT u, s, 0, p FROM UNNEST($1::text[], $2::text[], $3::bigint[]) AS t(u, s, p) \
         ON CONFLICT (user_id, symbol) DO UPDATE SET avg_price = EXCLUDED.avg_price"
    );
}

#[test]
fn signal_upsert_bind_count_independent_of_batch_size() {
    // Well past the 65535 bind-parameter limit at four binds per row.
    let updates: Vec<SignalUpdate> = (0..20_000)
        .map(|i| signal("u2", &format!("S{i}"), i))
        .collect();
    let qb = signal_upsert_query(&updates);
    let sql = qb.sql();
    assert!(sql.contains("$3::bigint[]"));
    assert!(!sql.contains("$4"));
}

#[test]
fn alert_update_sets_only_supplied_columns() {
    let patch = AlertPatch {
        is_active: Some(false),
        ..Default::default()
    };
    let qb = alert_update_query("BBB", "stock", &patch);
    let sql = qb.sql();
    assert!(sql.starts_with("UPDATE price_alerts SET updated_at = NOW()"));
    assert!(sql.contains("is_active = $1"));
    assert!(!sql.contains("alert_price ="));
    assert!(!sql.contains("operator ="));
    assert!(sql.contains("WHERE symbol = $2 AND asset_type = $3"));
}

#[test]
fn alert_update_with_no_fields_still_touches_updated_at() {
    let qb = alert_update_query("BBB", "stock", &AlertPatch::default());
    assert_eq!(
        qb.sql(),
        "UPDATE price_alerts SET updated_at = NOW() WHERE symbol = $1 AND asset_type = $2"
    );
}

#[test]
fn alert_update_with_all_fields() {
    let patch = AlertPatch {
        alert_price: Some(10.0),
        operator: Some(AlertOperator::AtOrAbove),
        is_active: Some(true),
    };
    let qb = alert_update_query("BBB", "stock", &patch);
    assert_eq!(
        qb.sql(),
        "UPDATE price_alerts SET updated_at = NOW(), alert_price = $1, operator = $2, \
         is_active = $3 WHERE symbol = $4 AND asset_type = $5"
    );
}
