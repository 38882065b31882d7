//! Constants shared across crates.

/// MIME type of modern Word documents (.docx).
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type of legacy Word documents (.doc).
pub const DOC_CONTENT_TYPE: &str = "application/msword";

/// MIME type of every generated document.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Rejection message for a disallowed Word upload type.
pub const WORD_TYPE_REJECTION: &str = "Only .doc and .docx files are allowed";

/// Rejection message for a disallowed image upload type.
pub const IMAGE_TYPE_REJECTION: &str = "Only image files are allowed";

/// Number of records returned by the recent conversions listing.
pub const RECENT_CONVERSIONS_LIMIT: i64 = 10;

/// Default size ceiling for uploads, in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 10;
