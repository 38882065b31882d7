use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{ScratchError, ScratchResult};
use crate::guard::ScratchGuard;
use crate::naming::{output_file_name, sanitize_filename, scratch_file_name};

const MAX_NAME_ATTEMPTS: u32 = 100;

/// A file fully written to the scratch directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Flat directory holding the inputs and outputs of in-flight conversions.
#[derive(Clone, Debug)]
pub struct ScratchDir {
    base_path: PathBuf,
    cleanup_delay: Duration,
}

impl ScratchDir {
    /// Create the directory if needed.
    ///
    /// # Arguments
    /// * `base_path` - Scratch directory (e.g., "uploads")
    /// * `cleanup_delay` - Grace period before a released guard removes its files
    pub async fn new(base_path: impl Into<PathBuf>, cleanup_delay: Duration) -> ScratchResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            ScratchError::ConfigError(format!(
                "Failed to create scratch directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(ScratchDir {
            base_path,
            cleanup_delay,
        })
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn cleanup_delay(&self) -> Duration {
        self.cleanup_delay
    }

    /// Fresh guard bound to this directory's grace delay.
    pub fn guard(&self) -> ScratchGuard {
        ScratchGuard::new(self.cleanup_delay)
    }

    /// Open a new scratch file for `original_name` with create-new semantics.
    ///
    /// The returned writer enforces `max_bytes` and removes the partial file
    /// if it is dropped before [`ScratchWriter::finish`].
    pub async fn create(&self, original_name: &str, max_bytes: usize) -> ScratchResult<ScratchWriter> {
        let sanitized = sanitize_filename(original_name)?;
        let millis = chrono::Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self
                .base_path
                .join(scratch_file_name(millis, attempt, &sanitized));

            match create_new(&path).await {
                Ok(file) => {
                    tracing::debug!(path = %path.display(), "Scratch file created");
                    return Ok(ScratchWriter {
                        file: Some(file),
                        path,
                        written: 0,
                        max_bytes,
                        finished: false,
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(ScratchError::WriteFailed(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Err(ScratchError::NameExhausted(sanitized))
    }

    /// Reserve the PDF path for a stored input.
    ///
    /// The name is `{stem}.pdf`, or `{stem}-{n}.pdf` when taken, and an
    /// empty file is created with create-new semantics. Inputs whose stems
    /// match (`report.docx` and `report.doc` stored in the same millisecond)
    /// therefore get distinct outputs, and an output never replaces its input.
    pub async fn reserve_output(&self, input: &Path) -> ScratchResult<PathBuf> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("document");

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.base_path.join(output_file_name(stem, attempt));

            match create_new(&path).await {
                Ok(_) => {
                    tracing::debug!(path = %path.display(), "Output path reserved");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(ScratchError::WriteFailed(format!(
                        "Failed to reserve output {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Err(ScratchError::NameExhausted(format!("{}.pdf", stem)))
    }

    /// Write a whole buffer as a new scratch file.
    pub async fn store_bytes(
        &self,
        original_name: &str,
        data: &[u8],
        max_bytes: usize,
    ) -> ScratchResult<StoredFile> {
        let mut writer = self.create(original_name, max_bytes).await?;
        writer.write_chunk(data).await?;
        writer.finish().await
    }
}

/// Streaming writer for one scratch file with a running size cap.
#[derive(Debug)]
pub struct ScratchWriter {
    file: Option<fs::File>,
    path: PathBuf,
    written: u64,
    max_bytes: usize,
    finished: bool,
}

impl ScratchWriter {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a chunk. Fails with [`ScratchError::TooLarge`] as soon as the
    /// running total exceeds the cap; the partial file is removed when the
    /// writer is dropped.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> ScratchResult<()> {
        let total = self.written + chunk.len() as u64;
        if total > self.max_bytes as u64 {
            return Err(ScratchError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| ScratchError::WriteFailed("Writer already closed".to_string()))?;

        file.write_all(chunk).await.map_err(|e| {
            ScratchError::WriteFailed(format!("Failed to write file {}: {}", self.path.display(), e))
        })?;
        self.written = total;
        Ok(())
    }

    /// Flush and close the file, keeping it on disk.
    pub async fn finish(mut self) -> ScratchResult<StoredFile> {
        if let Some(mut file) = self.file.take() {
            file.flush().await.map_err(|e| {
                ScratchError::WriteFailed(format!("Failed to flush file {}: {}", self.path.display(), e))
            })?;
            file.sync_all().await.map_err(|e| {
                ScratchError::WriteFailed(format!("Failed to sync file {}: {}", self.path.display(), e))
            })?;
        }
        self.finished = true;

        tracing::info!(
            path = %self.path.display(),
            size_bytes = self.written,
            "Scratch file stored"
        );

        Ok(StoredFile {
            path: self.path.clone(),
            size_bytes: self.written,
        })
    }
}

async fn create_new(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
}

impl Drop for ScratchWriter {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        drop(self.file.take());
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed partial scratch file"),
            Err(e) => tracing::debug!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove partial scratch file"
            ),
        }
    }
}
