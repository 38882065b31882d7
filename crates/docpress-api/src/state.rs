//! Shared application state.

use std::sync::Arc;

use docpress_core::Config;
use docpress_db::ConversionRecordStore;
use docpress_processing::ConverterRegistry;
use docpress_storage::ScratchDir;

/// Immutable state shared by every request.
///
/// Nothing here is mutated per request; each conversion works on its own
/// `UploadedFile` and scratch guard.
pub struct AppState {
    pub config: Config,
    pub scratch: ScratchDir,
    pub converters: ConverterRegistry,
    pub records: Arc<dyn ConversionRecordStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("scratch", &self.scratch)
            .field("converters", &self.converters)
            .finish_non_exhaustive()
    }
}
