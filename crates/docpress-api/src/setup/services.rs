//! Service construction

use anyhow::{Context, Result};
use docpress_core::Config;
use docpress_db::create_record_store;
use docpress_infra::CleanupService;
use docpress_processing::ConverterRegistry;
use docpress_storage::ScratchDir;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::state::AppState;

/// Build the shared state: scratch directory, converters and record store.
pub async fn initialize_services(config: &Config, pool: Option<PgPool>) -> Result<Arc<AppState>> {
    let scratch = ScratchDir::new(
        config.scratch_dir(),
        Duration::from_secs(config.cleanup_delay_secs()),
    )
    .await
    .context("Failed to prepare scratch directory")?;

    tracing::info!(
        scratch_dir = %scratch.path().display(),
        cleanup_delay_secs = config.cleanup_delay_secs(),
        "Scratch directory ready"
    );

    let converters = ConverterRegistry::with_defaults();
    tracing::info!(converters = ?converters, "Converters registered");

    let records = create_record_store(pool);

    Ok(Arc::new(AppState {
        config: config.clone(),
        scratch,
        converters,
        records,
    }))
}

/// Start the periodic sweep of stale scratch files.
pub fn start_cleanup(config: &Config, state: &AppState) -> tokio::task::JoinHandle<()> {
    let service = Arc::new(CleanupService::new(
        state.scratch.path(),
        Duration::from_secs(config.scratch_max_age_secs()),
    ));
    service.start()
}
