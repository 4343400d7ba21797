//! Configuration loading from an explicit lookup.

use portfolio_signals::config::AppConfig;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_without_environment() {
    let config = AppConfig::from_lookup(lookup(&[]));
    assert!(config.database_url.is_none());
    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.max_connections, 5);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn reads_all_keys() {
    let config = AppConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/signals"),
        ("BIND_ADDR", "127.0.0.1:9000"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("RUST_LOG", "debug"),
    ]));
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/signals"));
    assert_eq!(config.bind_addr, "127.0.0.1:9000");
    assert_eq!(config.max_connections, 12);
    assert_eq!(config.log_filter, "debug");
}

#[test]
fn blank_or_invalid_values_fall_back() {
    let config = AppConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "  "),
        ("DB_MAX_CONNECTIONS", "zero"),
    ]));
    assert!(config.database_url.is_none());
    assert_eq!(config.max_connections, 5);

    let config = AppConfig::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "0")]));
    assert_eq!(config.max_connections, 5);
}
