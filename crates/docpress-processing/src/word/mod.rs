//! Word to PDF: text extraction followed by text page generation.

mod extract;

pub use extract::extract_text;

use async_trait::async_trait;
use docpress_core::{ConversionResult, InputKind};

use crate::converter::{ConvertRequest, Converter};
use crate::error::{ConversionError, ConvertResult};
use crate::pdf::{PageLayout, TextPdfWriter};

/// Extracts the plain text of a .docx and lays it out on Letter pages.
#[derive(Debug, Clone, Default)]
pub struct WordConverter {
    writer: TextPdfWriter,
}

impl WordConverter {
    pub fn new(layout: PageLayout) -> Self {
        WordConverter {
            writer: TextPdfWriter::new(layout),
        }
    }

    /// Read the stored upload and return its text.
    #[tracing::instrument(skip(self), fields(stage = "extracting"))]
    pub async fn extract(&self, input: &std::path::Path) -> ConvertResult<String> {
        let data = tokio::fs::read(input).await.map_err(|e| {
            ConversionError::Extraction(format!("Failed to read {}: {}", input.display(), e))
        })?;

        let text = tokio::task::spawn_blocking(move || extract_text(&data))
            .await
            .map_err(|e| ConversionError::Extraction(format!("Extraction task failed: {}", e)))??;

        tracing::debug!(chars = text.chars().count(), "Text extracted");
        Ok(text)
    }

    /// Lay `text` out and write the PDF to `output`.
    #[tracing::instrument(skip(self, text), fields(stage = "generating"))]
    pub async fn generate(&self, text: String, output: &std::path::Path) -> ConvertResult<u64> {
        let writer = self.writer;
        let path = output.to_path_buf();
        let size = tokio::task::spawn_blocking(move || writer.write_file(&text, &path)).await??;
        Ok(size)
    }
}

#[async_trait]
impl Converter for WordConverter {
    fn kind(&self) -> InputKind {
        InputKind::Word
    }

    async fn convert(&self, request: ConvertRequest<'_>) -> ConvertResult<ConversionResult> {
        let text = self.extract(request.input).await?;
        let size_bytes = self.generate(text, request.output).await?;

        Ok(ConversionResult {
            output_path: request.output.to_path_buf(),
            size_bytes,
            completed_at: chrono::Utc::now(),
        })
    }
}
