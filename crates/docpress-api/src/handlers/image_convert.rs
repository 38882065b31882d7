use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::Response,
};
use docpress_core::InputKind;
use docpress_infra::ErrorResponse;

use crate::error::HttpAppError;
use crate::handlers::convert::convert_and_deliver;
use crate::handlers::RequestStage;
use crate::state::AppState;
use crate::utils::upload::{parse_image_settings, receive_upload, ImageUpload};

#[utoipa::path(
    post,
    path = "/convert/image",
    tag = "conversion",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "A single `file` image field plus optional `pageSize` (A4, Letter), \
            `orientation` (portrait, landscape), `margins` (none, small, normal), \
            `filter` (normal, BW, document) and `name` fields"),
    responses(
        (status = 200, description = "Image placed on a PDF page", content_type = "application/pdf"),
        (status = 400, description = "No file, disallowed type or unknown setting", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "PDF creation failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip_all,
    fields(
        kind = "image",
        stage = RequestStage::Received.as_str(),
        conversion_id = tracing::field::Empty,
        scratch_path = tracing::field::Empty
    )
)]
pub async fn convert_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response<Body>, HttpAppError> {
    let intake = receive_upload(&state.scratch, multipart, &ImageUpload(&state.config))
        .await
        .inspect_err(|_| RequestStage::Failed.enter())?;

    let settings =
        parse_image_settings(&intake.fields).inspect_err(|_| RequestStage::Failed.enter())?;
    tracing::debug!(settings = ?settings, "Image page settings");

    let millis = chrono::Utc::now().timestamp_millis();
    convert_and_deliver(&state, InputKind::Image, intake, Some(&settings), |file| {
        settings
            .output_file_name(millis)
            .unwrap_or_else(|| format!("{}.pdf", file.stem()))
    })
    .await
}
