use docpress_core::{AppError, ConversionRecord, ConversionStatus};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::conversion::{not_processing, ConversionRecordStore};

/// Conversion records in the `conversions` table.
#[derive(Clone)]
pub struct PgConversionRepository {
    pool: PgPool,
}

impl PgConversionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn finish(
        &self,
        id: Uuid,
        status: ConversionStatus,
        converted_size: Option<i64>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE conversions
            SET status = $2, converted_size = $3, completed_at = NOW()
            WHERE id = $1 AND status = 'processing'
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(converted_size)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_processing(id));
        }
        Ok(())
    }
}

fn record_from_row(row: &PgRow) -> Result<ConversionRecord, sqlx::Error> {
    Ok(ConversionRecord {
        id: row.try_get("id")?,
        filename: row.try_get("filename")?,
        original_size: row.try_get("original_size")?,
        converted_size: row.try_get("converted_size")?,
        status: row
            .try_get::<String, _>("status")?
            .parse()
            .map_err(|e: String| sqlx::Error::Decode(format!("Failed to parse status: {}", e).into()))?,
        created_at: row.try_get("created_at")?,
        completed_at: row.try_get("completed_at")?,
    })
}

#[async_trait::async_trait]
impl ConversionRecordStore for PgConversionRepository {
    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "conversions",
        db.operation = "insert"
    ))]
    async fn create(&self, filename: &str, original_size: i64) -> Result<ConversionRecord, AppError> {
        let record = ConversionRecord::processing(filename, original_size);

        sqlx::query(
            r#"
            INSERT INTO conversions (id, filename, original_size, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(&record.filename)
        .bind(record.original_size)
        .bind(record.status.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, filename = %filename, "Failed to insert conversion record");
            AppError::Database(e)
        })?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "conversions",
        db.operation = "update"
    ))]
    async fn complete(&self, id: Uuid, converted_size: i64) -> Result<(), AppError> {
        self.finish(id, ConversionStatus::Completed, Some(converted_size))
            .await
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "conversions",
        db.operation = "update"
    ))]
    async fn fail(&self, id: Uuid) -> Result<(), AppError> {
        self.finish(id, ConversionStatus::Failed, None).await
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "conversions",
        db.operation = "select"
    ))]
    async fn recent(&self, limit: i64) -> Result<Vec<ConversionRecord>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, filename, original_size, converted_size, status, created_at, completed_at
            FROM conversions
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
