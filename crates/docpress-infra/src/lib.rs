//! Docpress Infrastructure Library
//!
//! Shared infrastructure used by the API binary:
//! - Middleware (request ID)
//! - Telemetry initialization
//! - Error response body
//! - Scratch cleanup service

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod error;

#[cfg(feature = "cleanup")]
pub mod cleanup;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{request_id_middleware, RequestId};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};

pub use error::ErrorResponse;

#[cfg(feature = "cleanup")]
pub use cleanup::CleanupService;
