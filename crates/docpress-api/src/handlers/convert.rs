use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::Response,
};
use docpress_core::{ImagePageSettings, InputKind, UploadedFile};
use docpress_infra::ErrorResponse;
use docpress_processing::ConvertRequest;
use uuid::Uuid;

use crate::delivery::pdf_attachment;
use crate::error::HttpAppError;
use crate::handlers::RequestStage;
use crate::state::AppState;
use crate::utils::upload::{receive_upload, Intake, WordUpload};

#[utoipa::path(
    post,
    path = "/convert",
    tag = "conversion",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "A single `file` field holding a .doc or .docx document"),
    responses(
        (status = 200, description = "Converted PDF", content_type = "application/pdf"),
        (status = 400, description = "No file or disallowed type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Conversion failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip_all,
    fields(
        kind = "word",
        stage = RequestStage::Received.as_str(),
        conversion_id = tracing::field::Empty,
        scratch_path = tracing::field::Empty
    )
)]
pub async fn convert_document(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response<Body>, HttpAppError> {
    let intake = receive_upload(&state.scratch, multipart, &WordUpload(&state.config))
        .await
        .inspect_err(|_| RequestStage::Failed.enter())?;

    convert_and_deliver(&state, InputKind::Word, intake, None, |file| {
        format!("{}.pdf", file.stem())
    })
    .await
}

/// Record, convert and stream back one stored upload.
///
/// The intake guard gains the reserved output path and either moves into the
/// response body or is dropped on the failure path, so both scratch files
/// are removed after the grace delay in every case.
pub(crate) async fn convert_and_deliver(
    state: &AppState,
    kind: InputKind,
    intake: Intake,
    image_settings: Option<&ImagePageSettings>,
    download_name: impl FnOnce(&UploadedFile) -> String,
) -> Result<Response<Body>, HttpAppError> {
    let Intake {
        file, mut guard, ..
    } = intake;

    RequestStage::Stored.enter();
    let span = tracing::Span::current();
    span.record("scratch_path", tracing::field::display(file.storage_path.display()));

    let output = state
        .scratch
        .reserve_output(&file.storage_path)
        .await
        .inspect_err(|_| RequestStage::Failed.enter())?;
    guard.track(&output);

    let record = state
        .records
        .create(&file.original_name, file.size_bytes as i64)
        .await
        .inspect_err(|_| RequestStage::Failed.enter())?;
    span.record("conversion_id", tracing::field::display(record.id));

    let mut request = ConvertRequest::new(&file.storage_path, &output);
    if let Some(settings) = image_settings {
        request = request.with_image_settings(settings);
    }

    RequestStage::Converting.enter();
    let result = match state.converters.convert(kind, request).await {
        Ok(result) => result,
        Err(e) => {
            RequestStage::Failed.enter();
            mark_failed(state, record.id).await;
            return Err(e.into());
        }
    };

    if let Err(e) = state
        .records
        .complete(record.id, result.size_bytes as i64)
        .await
    {
        RequestStage::Failed.enter();
        mark_failed(state, record.id).await;
        return Err(e.into());
    }

    RequestStage::Delivering.enter();
    let name = download_name(&file);
    let response = pdf_attachment(&result.output_path, result.size_bytes, &name, guard).await?;

    tracing::info!(
        conversion_id = %record.id,
        original_name = %file.original_name,
        download_name = %name,
        size_bytes = result.size_bytes,
        "Conversion delivered"
    );

    Ok(response)
}

/// Best-effort move of a record to `failed`; the request error wins.
async fn mark_failed(state: &AppState, id: Uuid) {
    if let Err(e) = state.records.fail(id).await {
        tracing::warn!(
            error = %e,
            conversion_id = %id,
            "Failed to mark conversion as failed"
        );
    }
}
