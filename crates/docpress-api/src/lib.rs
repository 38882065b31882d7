//! Docpress API Library
//!
//! This crate provides the HTTP handlers, upload intake, PDF delivery and
//! application setup of the conversion service.

// Module declarations
mod api_doc;
mod delivery;
mod handlers;
mod utils;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use api_doc::ApiDoc;
pub use error::HttpAppError;
pub use state::AppState;
