//! Watchlist and portfolio tracking backend: per-position trade signals,
//! directional price alerts, and atomic bulk upserts over a single store.

pub mod alerts;
pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod persistence;
pub mod signals;
pub mod store;
pub mod types;
