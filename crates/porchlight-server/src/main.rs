//! Porchlight leasing assistant server binary.

use std::sync::Arc;

use anyhow::Context;
use porchlight_core::{FrontDesk, LogNotifier};
use porchlight_server::config::ServerConfig;
use porchlight_server::{AppState, prepare_inventory, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,porchlight_server=debug,porchlight_core=debug")
        }))
        .init();

    let config = ServerConfig::from_env();
    info!(
        addr = %config.bind_addr,
        db = %config.db_path.display(),
        "starting porchlight server"
    );

    let inventory = prepare_inventory(&config)?;
    let desk = Arc::new(FrontDesk::new(inventory, Arc::new(LogNotifier)));
    let app = router(AppState { desk });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
