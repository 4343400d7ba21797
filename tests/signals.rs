//! Signal evaluation tests: membership label, percent change, zero guards.

use portfolio_signals::signals::{SignalLabel, evaluate, evaluate_positions, percent_change};
use portfolio_signals::types::position::Position;
use std::collections::HashSet;

fn position(symbol: &str, avg_price: i64, current_price: i64) -> Position {
    Position {
        user_id: "u1".to_string(),
        symbol: symbol.to_string(),
        entry_price: 95,
        avg_price,
        current_price,
    }
}

fn watchlist(symbols: &[&str]) -> HashSet<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

#[test]
fn not_on_watchlist_is_sell() {
    let eval = evaluate(&position("AAA", 100, 110), false);
    assert_eq!(eval.signal, SignalLabel::Sell);
    assert_eq!(eval.percent_change, 0.10);
}

#[test]
fn on_watchlist_is_buy_and_hold() {
    let eval = evaluate(&position("AAA", 100, 110), true);
    assert_eq!(eval.signal, SignalLabel::BuyAndHold);
    assert_eq!(eval.percent_change, 0.10);
}

#[test]
fn label_ignores_price_direction() {
    let falling = evaluate(&position("AAA", 100, 50), true);
    assert_eq!(falling.signal, SignalLabel::BuyAndHold);
    assert_eq!(falling.percent_change, -0.5);

    let rising = evaluate(&position("AAA", 100, 300), false);
    assert_eq!(rising.signal, SignalLabel::Sell);
    assert_eq!(rising.percent_change, 2.0);
}

#[test]
fn percent_change_zero_when_either_price_missing() {
    assert_eq!(percent_change(0, 110), 0.0);
    assert_eq!(percent_change(100, 0), 0.0);
    assert_eq!(percent_change(0, 0), 0.0);
    assert_eq!(percent_change(-5, 10), 0.0);
}

#[test]
fn percent_change_matches_formula() {
    for (avg, cur) in [(100_i64, 110_i64), (37, 41), (250, 199), (1, 1_000_000)] {
        let expected = (cur - avg) as f64 / avg as f64;
        assert_eq!(percent_change(avg, cur), expected);
    }
}

#[test]
fn evaluate_positions_joins_on_symbol() {
    let positions = vec![position("AAA", 100, 110), position("BBB", 0, 20)];
    let out = evaluate_positions(&positions, &watchlist(&["BBB", "ZZZ"]));

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].symbol, "AAA");
    assert_eq!(out[0].signal, SignalLabel::Sell);
    assert_eq!(out[0].percent_change, 0.10);
    assert_eq!(out[0].entry_price, 95);
    assert_eq!(out[1].symbol, "BBB");
    assert_eq!(out[1].signal, SignalLabel::BuyAndHold);
    assert_eq!(out[1].percent_change, 0.0);
}

#[test]
fn empty_watchlist_means_everything_sells() {
    let positions = vec![position("AAA", 1, 2), position("BBB", 3, 4)];
    let out = evaluate_positions(&positions, &HashSet::new());
    assert!(out.iter().all(|r| r.signal == SignalLabel::Sell));
}

#[test]
fn label_serializes_as_display_text() {
    assert_eq!(
        serde_json::to_value(SignalLabel::BuyAndHold).unwrap(),
        serde_json::json!("BUY AND HOLD")
    );
    assert_eq!(
        serde_json::to_value(SignalLabel::Sell).unwrap(),
        serde_json::json!("Sell")
    );
}
