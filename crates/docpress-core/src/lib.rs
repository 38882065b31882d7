//! Docpress Core Library
//!
//! This crate provides the domain models, error types and configuration shared
//! by every docpress component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ConverterConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ConversionRecord, ConversionResult, ConversionStatus, ImageFilter, ImagePageSettings,
    InputKind, MarginPreset, Orientation, PaperSize, Rotation, UploadedFile,
};
