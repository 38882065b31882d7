use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Kind of input a converter accepts; the key of the converter registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Word,
    Image,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Word => write!(f, "word"),
            InputKind::Image => write!(f, "image"),
        }
    }
}

/// A file accepted by intake and written to the scratch directory.
///
/// Owned by exactly one request; removed with the request's scratch guard.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub storage_path: PathBuf,
    pub declared_media_type: String,
    pub size_bytes: u64,
    pub original_name: String,
}

impl UploadedFile {
    /// Scratch file name without its extension, e.g. `1700000000000-report`.
    pub fn stem(&self) -> String {
        self.storage_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(path: &str) -> UploadedFile {
        UploadedFile {
            storage_path: PathBuf::from(path),
            declared_media_type: "application/msword".to_string(),
            size_bytes: 10,
            original_name: "report.docx".to_string(),
        }
    }

    #[test]
    fn test_stem_strips_extension() {
        assert_eq!(uploaded("uploads/1700000000000-report.docx").stem(), "1700000000000-report");
        assert_eq!(uploaded("uploads/1700000000000-notes").stem(), "1700000000000-notes");
    }

    #[test]
    fn test_input_kind_display() {
        assert_eq!(InputKind::Word.to_string(), "word");
        assert_eq!(InputKind::Image.to_string(), "image");
    }
}
