use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use docpress_core::{ConversionResult, InputKind};

use crate::converter::{ConvertRequest, Converter};
use crate::error::{ConversionError, ConvertResult};

/// Converters keyed by the input kind they handle.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<InputKind, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every converter compiled into this build.
    pub fn with_defaults() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();
        #[cfg(feature = "word")]
        registry.register(Arc::new(crate::word::WordConverter::default()));
        #[cfg(feature = "image")]
        registry.register(Arc::new(crate::raster::ImageConverter));
        registry
    }

    /// Register a converter, replacing any previous one for the same kind.
    pub fn register(&mut self, converter: Arc<dyn Converter>) {
        self.converters.insert(converter.kind(), converter);
    }

    pub fn get(&self, kind: InputKind) -> Option<Arc<dyn Converter>> {
        self.converters.get(&kind).cloned()
    }

    pub fn supports(&self, kind: InputKind) -> bool {
        self.converters.contains_key(&kind)
    }

    /// Run the converter registered for `kind`.
    #[tracing::instrument(skip(self, request), fields(input = %request.input.display()))]
    pub async fn convert(
        &self,
        kind: InputKind,
        request: ConvertRequest<'_>,
    ) -> ConvertResult<ConversionResult> {
        let converter = self
            .get(kind)
            .ok_or_else(|| ConversionError::NoConverter(kind.to_string()))?;

        let start = Instant::now();
        let result = converter.convert(request).await;

        match &result {
            Ok(output) => tracing::info!(
                output = %output.output_path.display(),
                size_bytes = output.size_bytes,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Conversion completed"
            ),
            Err(e) => tracing::error!(
                error = %e,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Conversion failed"
            ),
        }

        result
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("kinds", &self.converters.keys().collect::<Vec<_>>())
            .finish()
    }
}
