//! Colour filters applied before an image is embedded.

use docpress_core::ImageFilter;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};

/// Document filter: contrast 150 %, then brightness 110 %.
const DOCUMENT_CONTRAST: f32 = 1.5;
const DOCUMENT_BRIGHTNESS: f32 = 1.1;

/// Pixel data ready to embed.
pub enum FilteredImage {
    Rgb(RgbImage),
    Gray(GrayImage),
}

impl FilteredImage {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            FilteredImage::Rgb(img) => img.dimensions(),
            FilteredImage::Gray(img) => img.dimensions(),
        }
    }

    pub fn color_space(&self) -> &'static str {
        match self {
            FilteredImage::Rgb(_) => "DeviceRGB",
            FilteredImage::Gray(_) => "DeviceGray",
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        match self {
            FilteredImage::Rgb(img) => img.into_raw(),
            FilteredImage::Gray(img) => img.into_raw(),
        }
    }
}

/// Flatten transparency onto white and apply `filter`.
pub fn apply_filter(image: &DynamicImage, filter: ImageFilter) -> FilteredImage {
    let rgb = flatten_on_white(image);
    match filter {
        ImageFilter::Normal => FilteredImage::Rgb(rgb),
        ImageFilter::BlackWhite => FilteredImage::Gray(DynamicImage::ImageRgb8(rgb).to_luma8()),
        ImageFilter::Document => {
            let mut gray = DynamicImage::ImageRgb8(rgb).to_luma8();
            for pixel in gray.pixels_mut() {
                pixel.0[0] = document_tone(pixel.0[0]);
            }
            FilteredImage::Gray(gray)
        }
    }
}

fn document_tone(value: u8) -> u8 {
    let v = value as f32 / 255.0;
    let contrasted = (v - 0.5) * DOCUMENT_CONTRAST + 0.5;
    let brightened = contrasted.clamp(0.0, 1.0) * DOCUMENT_BRIGHTNESS;
    (brightened.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}
