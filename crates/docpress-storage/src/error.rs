use docpress_core::AppError;
use thiserror::Error;

/// Scratch storage errors
#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Could not allocate a unique scratch name for {0}")]
    NameExhausted(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for scratch operations
pub type ScratchResult<T> = Result<T, ScratchError>;

impl From<ScratchError> for AppError {
    fn from(err: ScratchError) -> Self {
        match err {
            ScratchError::InvalidName(msg) => AppError::BadRequest(msg),
            ScratchError::TooLarge { .. } => AppError::PayloadTooLarge("File too large".to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}
