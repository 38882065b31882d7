use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a conversion record. Moves from `Processing` to exactly one
/// terminal status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    Processing,
    Completed,
    Failed,
}

impl ConversionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionStatus::Processing => "processing",
            ConversionStatus::Completed => "completed",
            ConversionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConversionStatus::Processing)
    }
}

impl FromStr for ConversionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(ConversionStatus::Processing),
            "completed" => Ok(ConversionStatus::Completed),
            "failed" => Ok(ConversionStatus::Failed),
            _ => Err(format!("Unknown conversion status: {}", s)),
        }
    }
}

impl std::fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted history entry for one conversion request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversionRecord {
    pub id: Uuid,
    pub filename: String,
    pub original_size: i64,
    pub converted_size: Option<i64>,
    pub status: ConversionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ConversionRecord {
    /// New record in the `Processing` state.
    pub fn processing(filename: impl Into<String>, original_size: i64) -> Self {
        ConversionRecord {
            id: Uuid::new_v4(),
            filename: filename.into(),
            original_size,
            converted_size: None,
            status: ConversionStatus::Processing,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// A generated PDF sitting in the scratch directory.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub output_path: PathBuf,
    pub size_bytes: u64,
    pub completed_at: DateTime<Utc>,
}
