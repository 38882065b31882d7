use docpress_core::AppError;
use thiserror::Error;

/// Errors raised while turning an upload into a PDF.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The input could not be read as text or decoded as an image.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The PDF could not be built or written to disk.
    #[error("PDF generation failed: {0}")]
    Generation(String),

    #[error("No converter registered for {0}")]
    NoConverter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConversionError>;

impl From<lopdf::Error> for ConversionError {
    fn from(err: lopdf::Error) -> Self {
        ConversionError::Generation(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ConversionError {
    fn from(err: tokio::task::JoinError) -> Self {
        ConversionError::Generation(format!("Conversion task failed: {}", err))
    }
}

impl ConversionError {
    /// Whether the failure happened before any PDF work started.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            ConversionError::Extraction(_) | ConversionError::UnsupportedFormat(_)
        )
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::Extraction(_) | ConversionError::UnsupportedFormat(_) => {
                AppError::ExtractionFailed(err.to_string())
            }
            ConversionError::NoConverter(_) => AppError::Internal(err.to_string()),
            ConversionError::Generation(_) | ConversionError::Io(_) => {
                AppError::GenerationFailed(err.to_string())
            }
        }
    }
}
