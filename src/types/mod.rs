pub mod alert;
pub mod position;
pub mod watchlist;
