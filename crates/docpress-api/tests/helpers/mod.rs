//! Test helpers: build the router over a temporary scratch directory.
//!
//! Records use the in-memory store, so no database is needed. Run with
//! `cargo test -p docpress-api`.

#![allow(dead_code)]

pub mod fixtures;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use docpress_api::setup::{routes, services};
use docpress_api::AppState;
use docpress_core::{Config, ConverterConfig};
use docpress_db::ConversionRecordStore;
use tempfile::TempDir;

/// Grace delay used by test apps.
pub const TEST_CLEANUP_DELAY: Duration = Duration::from_secs(1);

/// Test application: server plus the scratch directory it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub scratch_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// File names currently in the scratch directory, sorted.
    pub fn scratch_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.scratch_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Wait out the grace delay plus scheduling slack.
    pub async fn wait_for_cleanup(&self) {
        tokio::time::sleep(TEST_CLEANUP_DELAY + Duration::from_millis(750)).await;
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup a test app, letting the caller adjust the configuration first.
pub async fn setup_test_app_with(customize: impl FnOnce(&mut ConverterConfig)) -> TestApp {
    build_test_app(customize, None).await
}

/// Setup a test app that writes conversion records to `records`.
pub async fn setup_test_app_with_records(records: Arc<dyn ConversionRecordStore>) -> TestApp {
    build_test_app(|_| {}, Some(records)).await
}

async fn build_test_app(
    customize: impl FnOnce(&mut ConverterConfig),
    records: Option<Arc<dyn ConversionRecordStore>>,
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let scratch_dir = temp_dir.path().join("uploads");

    let mut inner = ConverterConfig {
        scratch_dir: scratch_dir.to_string_lossy().into_owned(),
        cleanup_delay_secs: TEST_CLEANUP_DELAY.as_secs(),
        ..ConverterConfig::default()
    };
    customize(&mut inner);
    let config = Config::new(inner);

    let mut state = services::initialize_services(&config, None)
        .await
        .expect("Failed to initialize services");
    if let Some(records) = records {
        Arc::get_mut(&mut state)
            .expect("state is not shared yet")
            .records = records;
    }
    let app = routes::setup_routes(&config, state.clone()).expect("Failed to setup routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        state,
        scratch_dir,
        _temp_dir: temp_dir,
    }
}
