mod config;
mod error;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::store::PostgresStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::from_env().context("invalid configuration")?;
    init_tracing();

    let store = PostgresStore::connect(&config.database_url, config.database_max_connections)
        .await
        .context("Error connecting DB")?;
    store.migrate().await.context("Error running migrations")?;

    let state = state::AppState::new(Arc::new(store), &config.jwt_secret);

    let app = routes::routes(state);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("could not bind {}", config.addr()))?;

    info!("server is listening on http://{}", config.addr());

    axum::serve(listener, app).await?;
    Ok(())
}
