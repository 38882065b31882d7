use std::sync::Arc;

use docpress_core::{AppError, ConversionRecord};
use sqlx::PgPool;
use uuid::Uuid;

use super::memory::InMemoryConversionRepository;
use super::postgres::PgConversionRepository;

/// Storage for conversion history.
///
/// A record is created in the `processing` state and moved to exactly one
/// terminal state; a second transition is rejected with `NotFound`.
#[async_trait::async_trait]
pub trait ConversionRecordStore: Send + Sync {
    /// Insert a new `processing` record.
    async fn create(&self, filename: &str, original_size: i64) -> Result<ConversionRecord, AppError>;

    /// Mark a processing record completed with the size of the produced PDF.
    async fn complete(&self, id: Uuid, converted_size: i64) -> Result<(), AppError>;

    /// Mark a processing record failed.
    async fn fail(&self, id: Uuid) -> Result<(), AppError>;

    /// Most recent records, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<ConversionRecord>, AppError>;
}

/// Pick the record store: Postgres when a pool is available, memory otherwise.
pub fn create_record_store(pool: Option<PgPool>) -> Arc<dyn ConversionRecordStore> {
    match pool {
        Some(pool) => {
            tracing::info!("Initializing PostgreSQL conversion record store");
            Arc::new(PgConversionRepository::new(pool))
        }
        None => {
            tracing::info!("DATABASE_URL not set; keeping conversion records in memory");
            Arc::new(InMemoryConversionRepository::new())
        }
    }
}

pub(crate) fn not_processing(id: Uuid) -> AppError {
    AppError::NotFound(format!("No processing conversion record with id {}", id))
}
