//! Binary entrypoint: config, pool, migrations, router, serve.

use anyhow::Result;
use biztime::config::AppConfig;
use biztime::server::{AppState, build_router, serve};
use biztime::storage::PgStore;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("connected to database");

    let state = AppState::from_store(Arc::new(PgStore::new(pool)));
    serve(&config.bind_addr, build_router(state)).await
}
