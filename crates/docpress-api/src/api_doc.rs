//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::handlers;
use docpress_core::models;
use docpress_infra::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docpress API",
        version = "0.1.0",
        description = "Converts uploaded Word documents and images to PDF. Files are kept only for the duration of a request plus a short grace period."
    ),
    paths(
        handlers::convert::convert_document,
        handlers::image_convert::convert_image,
        handlers::conversions::list_conversions,
        handlers::health::health_check,
    ),
    components(
        schemas(
            ErrorResponse,
            handlers::health::HealthResponse,
            models::ConversionRecord,
            models::ConversionStatus,
            models::PaperSize,
            models::Orientation,
            models::MarginPreset,
            models::ImageFilter,
            models::Rotation,
            models::ImagePageSettings,
        )
    ),
    tags(
        (name = "conversion", description = "Document and image conversion"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
