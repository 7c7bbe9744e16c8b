use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use transaction_service::{http, import_async, Config, Engine, SharedEngine};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let engine = SharedEngine::new(Engine::with_max_depth(config.max_depth));

    if let Some(seed) = &config.seed {
        info!("Seeding store from {}", seed.display());
        seed_store(seed, engine.clone()).await?;
    }

    let app = http::router(engine);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("Listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn seed_store(path: &Path, engine: SharedEngine) -> Result<usize> {
    import_async(path, engine)
        .await
        .map_err(anyhow::Error::from_boxed)
        .with_context(|| format!("failed to import {}", path.display()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
