use std::path::Path;

use async_trait::async_trait;
use docpress_core::{ConversionResult, ImagePageSettings, InputKind};

use crate::error::ConvertResult;

/// Paths and options for one conversion.
#[derive(Debug, Clone, Copy)]
pub struct ConvertRequest<'a> {
    /// Stored upload to read.
    pub input: &'a Path,
    /// Destination of the generated PDF, reserved by the caller.
    pub output: &'a Path,
    /// Page settings for the image flow; ignored by text converters.
    pub image_settings: Option<&'a ImagePageSettings>,
}

impl<'a> ConvertRequest<'a> {
    pub fn new(input: &'a Path, output: &'a Path) -> Self {
        ConvertRequest {
            input,
            output,
            image_settings: None,
        }
    }

    pub fn with_image_settings(mut self, settings: &'a ImagePageSettings) -> Self {
        self.image_settings = Some(settings);
        self
    }
}

/// Turns one stored input into a PDF written at `request.output`.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Input kind this converter is registered under.
    fn kind(&self) -> InputKind;

    async fn convert(&self, request: ConvertRequest<'_>) -> ConvertResult<ConversionResult>;
}
