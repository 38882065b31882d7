//! Application setup and initialization
//!
//! Everything `main` needs before serving: configuration checks, telemetry,
//! the optional record database, the scratch directory and its sweeper, the
//! converter registry and the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use docpress_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    docpress_infra::init_telemetry("docpress-api", config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Conversion records go to Postgres only when DATABASE_URL is set
    let pool = database::setup_database(&config).await?;

    let state = services::initialize_services(&config, pool).await?;

    // Sweep scratch files left behind by an earlier shutdown
    let _cleanup_task = services::start_cleanup(&config, &state);

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
