use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Points per CSS pixel (96 dpi screen pixel to 72 dpi PDF unit).
pub const POINTS_PER_PIXEL: f32 = 0.75;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    /// Portrait width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::Letter => (612.0, 792.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            other => Err(format!("Unknown page size: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!("Unknown orientation: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum MarginPreset {
    None,
    Small,
    #[default]
    Normal,
}

impl MarginPreset {
    pub fn pixels(&self) -> f32 {
        match self {
            MarginPreset::None => 0.0,
            MarginPreset::Small => 20.0,
            MarginPreset::Normal => 40.0,
        }
    }

    pub fn points(&self) -> f32 {
        self.pixels() * POINTS_PER_PIXEL
    }
}

impl FromStr for MarginPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(MarginPreset::None),
            "small" => Ok(MarginPreset::Small),
            "normal" => Ok(MarginPreset::Normal),
            other => Err(format!("Unknown margins: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum ImageFilter {
    #[default]
    Normal,
    /// Grayscale.
    #[serde(rename = "BW")]
    BlackWhite,
    /// Grayscale with boosted contrast and brightness, for scanned pages.
    Document,
}

impl FromStr for ImageFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(ImageFilter::Normal),
            "bw" => Ok(ImageFilter::BlackWhite),
            "document" => Ok(ImageFilter::Document),
            other => Err(format!("Unknown filter: {}", other)),
        }
    }
}

/// Clockwise quarter turns applied to the image before filtering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Rotation {
    #[default]
    #[serde(rename = "0")]
    None,
    #[serde(rename = "90")]
    Quarter,
    #[serde(rename = "180")]
    Half,
    #[serde(rename = "270")]
    ThreeQuarters,
}

impl Rotation {
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarters => 270,
        }
    }
}

impl FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Rotation::None),
            "90" => Ok(Rotation::Quarter),
            "180" => Ok(Rotation::Half),
            "270" => Ok(Rotation::ThreeQuarters),
            other => Err(format!("Unknown rotation: {}", other)),
        }
    }
}

/// Page settings of the image flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImagePageSettings {
    pub page_size: PaperSize,
    pub orientation: Orientation,
    pub margins: MarginPreset,
    pub filter: ImageFilter,
    pub rotation: Rotation,
    pub output_name: Option<String>,
}

impl ImagePageSettings {
    /// Page width and height in points after applying the orientation.
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page_size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Download name `{name}_{millis}.pdf`, with the name reduced to
    /// `[A-Za-z0-9_-]`. `None` when no usable name was given.
    pub fn output_file_name(&self, unix_millis: i64) -> Option<String> {
        let name = self.output_name.as_deref()?;
        let cleaned: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        Some(format!("{}_{}.pdf", cleaned, unix_millis))
    }
}
