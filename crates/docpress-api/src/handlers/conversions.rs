use std::sync::Arc;

use axum::{extract::State, Json};
use docpress_core::constants::RECENT_CONVERSIONS_LIMIT;
use docpress_core::ConversionRecord;
use docpress_infra::ErrorResponse;

use crate::error::HttpAppError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/conversions",
    tag = "conversion",
    responses(
        (status = 200, description = "Most recent conversions, newest first", body = Vec<ConversionRecord>),
        (status = 500, description = "Record store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_conversions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ConversionRecord>>, HttpAppError> {
    let records = state.records.recent(RECENT_CONVERSIONS_LIMIT).await?;
    Ok(Json(records))
}
