use std::path::{Path, PathBuf};
use std::time::Duration;

/// Owns the scratch paths of one request.
///
/// Dropping the guard schedules removal of every tracked path after the
/// grace delay. Removal failures are logged at debug level and otherwise
/// ignored; the stale sweep catches anything left behind.
#[derive(Debug)]
pub struct ScratchGuard {
    paths: Vec<PathBuf>,
    delay: Duration,
}

impl ScratchGuard {
    pub fn new(delay: Duration) -> Self {
        ScratchGuard {
            paths: Vec::new(),
            delay,
        }
    }

    /// Track a path for deferred removal.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        if self.paths.is_empty() {
            return;
        }

        let paths = std::mem::take(&mut self.paths);
        let delay = self.delay;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    for path in &paths {
                        remove_quietly(path).await;
                    }
                });
            }
            Err(_) => {
                for path in &paths {
                    let _ = std::fs::remove_file(path);
                }
            }
        }
    }
}

async fn remove_quietly(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Scratch file removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::debug!(
            path = %path.display(),
            error = %e,
            "Failed to remove scratch file"
        ),
    }
}
