use std::path::Path;

use crate::error::{ScratchError, ScratchResult};

const MAX_FILENAME_LENGTH: usize = 200;

/// Sanitize an uploaded file name for use inside the scratch directory.
///
/// Directory components are dropped, `..` is rejected and every character
/// outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_filename(filename: &str) -> ScratchResult<String> {
    if filename.contains("..") {
        return Err(ScratchError::InvalidName(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let normalized = filename.replace('\\', "/");
    let filename_only = Path::new(&normalized)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '.' || c == '_').is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

/// Scratch name for an upload: `{millis}-{name}`, or `{millis}-{n}-{name}`
/// for the n-th retry after a collision.
pub fn scratch_file_name(unix_millis: i64, attempt: u32, sanitized: &str) -> String {
    if attempt == 0 {
        format!("{}-{}", unix_millis, sanitized)
    } else {
        format!("{}-{}-{}", unix_millis, attempt, sanitized)
    }
}

/// Output name derived from a scratch input stem: `{stem}.pdf`, or
/// `{stem}-{n}.pdf` for the n-th retry after a collision.
pub fn output_file_name(stem: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}.pdf", stem)
    } else {
        format!("{}-{}.pdf", stem, attempt)
    }
}
