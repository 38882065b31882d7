//! Periodic removal of scratch files left behind by interrupted requests.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use docpress_storage::purge_stale;
use tokio::time::interval;

const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

#[derive(Clone, Debug)]
pub struct CleanupService {
    scratch_dir: PathBuf,
    /// Files older than this are considered abandoned.
    max_age: Duration,
}

impl CleanupService {
    pub fn new(scratch_dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            max_age,
        }
    }

    /// Start the background sweep: once immediately, then every hour.
    /// Returns a JoinHandle for graceful shutdown
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut cleanup_interval = interval(SWEEP_INTERVAL);

            loop {
                cleanup_interval.tick().await;

                tracing::info!("Starting scheduled scratch sweep");
                if let Err(e) = self.sweep().await {
                    tracing::error!(error = %e, "Scratch sweep failed");
                }
            }
        })
    }

    /// Remove stale files once and return how many were deleted.
    #[tracing::instrument(skip(self), fields(cleanup.dir = %self.scratch_dir.display()))]
    pub async fn sweep(&self) -> Result<usize, anyhow::Error> {
        let removed = purge_stale(&self.scratch_dir, self.max_age).await?;
        tracing::info!(removed, "Scratch sweep completed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_removes_expired_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1-left.docx"), b"x").unwrap();
        std::fs::write(dir.path().join("1-left.pdf"), b"y").unwrap();

        let service = CleanupService::new(dir.path(), Duration::ZERO);
        assert_eq!(service.sweep().await.unwrap(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_sweep_keeps_recent_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1-live.docx"), b"x").unwrap();

        let service = CleanupService::new(dir.path(), Duration::from_secs(3600));
        assert_eq!(service.sweep().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_start_runs_first_sweep_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("1-stale.pdf");
        std::fs::write(&file, b"x").unwrap();

        let handle = Arc::new(CleanupService::new(dir.path(), Duration::ZERO)).start();
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        assert!(!file.exists());
    }
}
