use std::path::Path;
use std::time::{Duration, SystemTime};

use tokio::fs;

use crate::error::ScratchResult;

/// Remove scratch files whose modification time is older than `max_age`.
///
/// Returns the number of files removed. Subdirectories are left alone.
pub async fn purge_stale(dir: &Path, max_age: Duration) -> ScratchResult<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let metadata = match entry.metadata().await {
            Ok(m) => m,
            Err(_) => continue,
        };
        if !metadata.is_file() {
            continue;
        }

        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or_default();

        if age >= max_age {
            match fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) => tracing::debug!(
                    path = %entry.path().display(),
                    error = %e,
                    "Failed to remove stale scratch file"
                ),
            }
        }
    }

    if removed > 0 {
        tracing::info!(dir = %dir.display(), removed, "Purged stale scratch files");
    }

    Ok(removed)
}
