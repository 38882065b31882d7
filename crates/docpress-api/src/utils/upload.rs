//! Multipart intake shared by the conversion handlers.
//!
//! Exactly one field named `file` is accepted. Its declared media type is
//! checked before anything touches the disk, then the field is streamed
//! chunk by chunk into a fresh scratch file with a running size cap.

use std::collections::HashMap;

use axum::extract::Multipart;
use docpress_core::constants::{IMAGE_TYPE_REJECTION, WORD_TYPE_REJECTION};
use docpress_core::{AppError, Config, ImagePageSettings, InputKind, UploadedFile};
use docpress_storage::{ScratchDir, ScratchGuard};

use crate::error::HttpAppError;
use crate::handlers::RequestStage;

const FILE_FIELD: &str = "file";
const OCTET_STREAM: &str = "application/octet-stream";
const MAX_TEXT_FIELD_BYTES: usize = 1024;

/// Per-route intake rules.
pub trait UploadPolicy: Send + Sync {
    fn kind(&self) -> InputKind;

    fn max_file_size(&self) -> usize;

    fn allowed_content_types(&self) -> &[String];

    /// Client message for a disallowed media type.
    fn rejection_message(&self) -> &'static str;

    /// Text fields collected next to the file; anything else is skipped.
    fn text_fields(&self) -> &[&'static str] {
        &[]
    }
}

pub struct WordUpload<'a>(pub &'a Config);

impl UploadPolicy for WordUpload<'_> {
    fn kind(&self) -> InputKind {
        InputKind::Word
    }

    fn max_file_size(&self) -> usize {
        self.0.max_document_size_bytes()
    }

    fn allowed_content_types(&self) -> &[String] {
        self.0.document_allowed_content_types()
    }

    fn rejection_message(&self) -> &'static str {
        WORD_TYPE_REJECTION
    }
}

pub struct ImageUpload<'a>(pub &'a Config);

impl UploadPolicy for ImageUpload<'_> {
    fn kind(&self) -> InputKind {
        InputKind::Image
    }

    fn max_file_size(&self) -> usize {
        self.0.max_image_size_bytes()
    }

    fn allowed_content_types(&self) -> &[String] {
        self.0.image_allowed_content_types()
    }

    fn rejection_message(&self) -> &'static str {
        IMAGE_TYPE_REJECTION
    }

    fn text_fields(&self) -> &[&'static str] {
        &["pageSize", "orientation", "margins", "filter", "rotate", "name"]
    }
}

/// Result of a successful intake.
///
/// The guard already tracks the stored input; dropping it schedules removal.
#[derive(Debug)]
pub struct Intake {
    pub file: UploadedFile,
    pub fields: HashMap<String, String>,
    pub guard: ScratchGuard,
}

/// Normalize MIME type by stripping parameters (e.g. "image/png; q=1" -> "image/png").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate content type against the allow-list, comparing the normalized type only.
pub fn validate_content_type(
    content_type: &str,
    allowed_types: &[String],
    rejection: &str,
) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type);
    if !allowed_types
        .iter()
        .any(|allowed| normalized == allowed.to_lowercase())
    {
        return Err(AppError::BadRequest(rejection.to_string()));
    }
    Ok(())
}

/// Read the multipart body, storing the `file` field in the scratch directory.
pub async fn receive_upload(
    scratch: &ScratchDir,
    mut multipart: Multipart,
    policy: &dyn UploadPolicy,
) -> Result<Intake, HttpAppError> {
    let mut guard = scratch.guard();
    let mut file: Option<UploadedFile> = None;
    let mut fields = HashMap::new();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if name == FILE_FIELD {
            if file.is_some() {
                return Err(AppError::BadRequest(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                )
                .into());
            }

            let content_type = field.content_type().unwrap_or(OCTET_STREAM).to_string();
            validate_content_type(
                &content_type,
                policy.allowed_content_types(),
                policy.rejection_message(),
            )?;
            RequestStage::Validated.enter();

            let original_name = field.file_name().unwrap_or("upload").to_string();
            let mut writer = scratch
                .create(&original_name, policy.max_file_size())
                .await?;

            while let Some(chunk) = field.chunk().await? {
                writer.write_chunk(&chunk).await?;
            }

            let stored = writer.finish().await?;
            guard.track(&stored.path);

            tracing::debug!(
                kind = %policy.kind(),
                original_name = %original_name,
                content_type = %content_type,
                size_bytes = stored.size_bytes,
                "Upload stored"
            );

            file = Some(UploadedFile {
                storage_path: stored.path,
                declared_media_type: normalize_mime_type(&content_type),
                size_bytes: stored.size_bytes,
                original_name,
            });
        } else if policy.text_fields().contains(&name.as_str()) {
            let value = field.text().await?;
            if value.len() > MAX_TEXT_FIELD_BYTES {
                return Err(AppError::BadRequest(format!("Field {} is too long", name)).into());
            }
            fields.insert(name, value);
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    Ok(Intake {
        file,
        fields,
        guard,
    })
}

/// Page settings from the optional image form fields. Empty values keep the default.
pub fn parse_image_settings(
    fields: &HashMap<String, String>,
) -> Result<ImagePageSettings, AppError> {
    fn parse<T: std::str::FromStr<Err = String> + Default>(
        fields: &HashMap<String, String>,
        key: &str,
    ) -> Result<T, AppError> {
        match fields.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(value) => value.parse().map_err(AppError::BadRequest),
            None => Ok(T::default()),
        }
    }

    Ok(ImagePageSettings {
        page_size: parse(fields, "pageSize")?,
        orientation: parse(fields, "orientation")?,
        margins: parse(fields, "margins")?,
        filter: parse(fields, "filter")?,
        rotation: parse(fields, "rotate")?,
        output_name: fields
            .get("name")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()),
    })
}
