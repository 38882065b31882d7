//! Image to PDF: one decoded image centred on a single page.

mod filter;

pub use filter::{apply_filter, FilteredImage};

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use docpress_core::models::POINTS_PER_PIXEL;
use docpress_core::{ConversionResult, ImagePageSettings, InputKind, Rotation};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

use crate::converter::{ConvertRequest, Converter};
use crate::error::{ConversionError, ConvertResult};
use crate::pdf::{save_document, PdfBuilder};

const IMAGE_NAME: &str = "Im1";

/// Where an image lands on the page, in points from the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit an image of `pixels` inside the page margins, centred. Never scaled
/// above its natural size at 96 dpi.
pub fn place_image(pixels: (u32, u32), settings: &ImagePageSettings) -> Placement {
    let (page_w, page_h) = settings.page_dimensions();
    let margin = settings.margins.points();
    let avail_w = (page_w - 2.0 * margin).max(1.0);
    let avail_h = (page_h - 2.0 * margin).max(1.0);

    let natural_w = pixels.0.max(1) as f32 * POINTS_PER_PIXEL;
    let natural_h = pixels.1.max(1) as f32 * POINTS_PER_PIXEL;
    let scale = (avail_w / natural_w).min(avail_h / natural_h).min(1.0);

    let width = natural_w * scale;
    let height = natural_h * scale;
    Placement {
        x: (page_w - width) / 2.0,
        y: (page_h - height) / 2.0,
        width,
        height,
    }
}

/// Turn the decoded image clockwise by `rotation`.
pub fn rotate_image(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => image,
        Rotation::Quarter => image.rotate90(),
        Rotation::Half => image.rotate180(),
        Rotation::ThreeQuarters => image.rotate270(),
    }
}

/// Decode, rotate, filter and embed an image on one page, writing the PDF
/// to `output`. Blocking.
pub fn render_image_pdf(data: &[u8], settings: &ImagePageSettings, output: &Path) -> ConvertResult<u64> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| ConversionError::Extraction(format!("Failed to decode image: {}", e)))?;

    let rotated = rotate_image(decoded, settings.rotation);
    let filtered = apply_filter(&rotated, settings.filter);
    let (px_w, px_h) = filtered.dimensions();
    if px_w == 0 || px_h == 0 {
        return Err(ConversionError::Extraction("Image has no pixels".to_string()));
    }
    let color_space = filtered.color_space();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&filtered.into_raw())?;
    let compressed = encoder.finish()?;

    let mut builder = PdfBuilder::new();
    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => px_w as i64,
            "Height" => px_h as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8i64,
            "Filter" => "FlateDecode",
        },
        compressed,
    )
    .with_compression(false);
    let image_id = builder.add_object(image_stream);

    let placement = place_image((px_w, px_h), settings);
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    placement.width.into(),
                    Object::Integer(0),
                    Object::Integer(0),
                    placement.height.into(),
                    placement.x.into(),
                    placement.y.into(),
                ],
            ),
            Operation::new("Do", vec![IMAGE_NAME.into()]),
            Operation::new("Q", vec![]),
        ],
    };

    let (page_w, page_h) = settings.page_dimensions();
    builder.add_page(
        page_w,
        page_h,
        content,
        dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        },
    )?;

    let mut doc = builder.finish()?;
    save_document(&mut doc, output)
}

/// Embeds a JPEG/PNG/GIF/WebP image on an A4 or Letter page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageConverter;

#[async_trait]
impl Converter for ImageConverter {
    fn kind(&self) -> InputKind {
        InputKind::Image
    }

    #[tracing::instrument(skip(self, request), fields(stage = "generating"))]
    async fn convert(&self, request: ConvertRequest<'_>) -> ConvertResult<ConversionResult> {
        let data = tokio::fs::read(request.input).await.map_err(|e| {
            ConversionError::Extraction(format!("Failed to read {}: {}", request.input.display(), e))
        })?;
        let settings = request.image_settings.cloned().unwrap_or_default();
        let output = request.output.to_path_buf();

        let size_bytes = tokio::task::spawn_blocking(move || {
            render_image_pdf(&data, &settings, &output)
        })
        .await??;

        Ok(ConversionResult {
            output_path: request.output.to_path_buf(),
            size_bytes,
            completed_at: chrono::Utc::now(),
        })
    }
}
