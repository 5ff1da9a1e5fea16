//! HTTP surface for the Porchlight leasing assistant.
//!
//! A thin axum veneer over [`porchlight_core::FrontDesk`]: one chat route,
//! a liveness route, permissive CORS, and request tracing.

pub mod config;
pub mod error;
pub mod routes;

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use porchlight_core::{FrontDesk, Inventory};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The leasing assistant serving every session.
    pub desk: Arc<FrontDesk>,
}

/// Build the router with all routes, CORS, and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(routes::chat))
        .route("/health", get(routes::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the inventory at the configured path, seeding it when the database
/// file is newly created and a seed file is present.
pub fn prepare_inventory(config: &ServerConfig) -> anyhow::Result<Inventory> {
    let fresh = !config.db_path.exists();
    let inventory = Inventory::open(&config.db_path)
        .with_context(|| format!("open inventory at {}", config.db_path.display()))?;
    if fresh {
        match fs::read_to_string(&config.seed_path) {
            Ok(sql) => {
                inventory.seed_batch(&sql).context("apply seed batch")?;
                info!(seed = %config.seed_path.display(), "seeded new inventory");
            }
            Err(err) => warn!(
                seed = %config.seed_path.display(),
                "seed file missing, starting with an empty inventory: {err}"
            ),
        }
    }
    Ok(inventory)
}
