use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use groupbuy_api::{app, config, database::DatabaseManager, is_development};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting groupbuy API in {:?} mode", config.environment);

    if config.security.session_secret.is_empty() {
        anyhow::bail!("SESSION_SECRET must be set outside development");
    }
    if config.security.identity_token_secret.is_empty() {
        tracing::warn!("IDENTITY_TOKEN_SECRET is not set; sign-in and registration will be refused");
    }
    if is_development!() {
        tracing::warn!("Using development defaults; do not expose this instance");
    }

    let pool = DatabaseManager::connect_lazy(&config.database).context("failed to create database pool")?;

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Groupbuy API listening on http://{}", bind_addr);

    axum::serve(listener, app(pool)).await.context("server error")?;
    Ok(())
}
