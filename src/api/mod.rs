//! HTTP surface: axum routes over the store and evaluators.

pub mod alerts;
pub mod routes;
pub mod trades;
pub mod watchlists;
