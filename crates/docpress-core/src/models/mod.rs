//! Data models for the application
//!
//! Per-request value objects (`UploadedFile`, `ConversionResult`,
//! `ImagePageSettings`) and the persisted `ConversionRecord`.

mod conversion;
mod settings;
mod upload;

pub use conversion::*;
pub use settings::*;
pub use upload::*;
