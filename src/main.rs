use std::sync::Arc;

use portfolio_signals::api::routes::{AppState, app_router};
use portfolio_signals::config::AppConfig;
use portfolio_signals::persistence::{PgStore, create_pool_and_migrate};
use portfolio_signals::store::{MemoryStore, SharedStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let store: SharedStore = match &config.database_url {
        Some(url) => {
            let pool = create_pool_and_migrate(url, config.max_connections).await?;
            tracing::info!(max_connections = config.max_connections, "connected to database");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let app = app_router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
