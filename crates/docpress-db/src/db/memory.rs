use std::collections::HashMap;

use chrono::Utc;
use docpress_core::{AppError, ConversionRecord, ConversionStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::conversion::{not_processing, ConversionRecordStore};

/// Process-local record store used when no database is configured.
#[derive(Default)]
pub struct InMemoryConversionRepository {
    records: RwLock<HashMap<Uuid, ConversionRecord>>,
}

impl InMemoryConversionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn finish(
        &self,
        id: Uuid,
        status: ConversionStatus,
        converted_size: Option<i64>,
    ) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .filter(|r| r.status == ConversionStatus::Processing)
            .ok_or_else(|| not_processing(id))?;

        record.status = status;
        record.converted_size = converted_size;
        record.completed_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait::async_trait]
impl ConversionRecordStore for InMemoryConversionRepository {
    async fn create(&self, filename: &str, original_size: i64) -> Result<ConversionRecord, AppError> {
        let record = ConversionRecord::processing(filename, original_size);
        self.records
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn complete(&self, id: Uuid, converted_size: i64) -> Result<(), AppError> {
        self.finish(id, ConversionStatus::Completed, Some(converted_size))
            .await
    }

    async fn fail(&self, id: Uuid) -> Result<(), AppError> {
        self.finish(id, ConversionStatus::Failed, None).await
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ConversionRecord>, AppError> {
        let records = self.records.read().await;
        let mut all: Vec<ConversionRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit.max(0) as usize);
        Ok(all)
    }
}
