//! Docpress processing
//!
//! Converters that turn a stored upload into a PDF in the scratch
//! directory, the registry that picks one by [`InputKind`], and the PDF
//! writers they share.
//!
//! [`InputKind`]: docpress_core::InputKind

pub mod converter;
pub mod error;
pub mod pdf;
pub mod registry;
pub mod sniff;

#[cfg(feature = "image")]
pub mod raster;
#[cfg(feature = "word")]
pub mod word;

pub use converter::{ConvertRequest, Converter};
pub use error::{ConversionError, ConvertResult};
pub use pdf::{PageLayout, TextPdfWriter};
pub use registry::ConverterRegistry;
pub use sniff::{sniff_document, DocumentFormat};

#[cfg(feature = "image")]
pub use raster::ImageConverter;
#[cfg(feature = "word")]
pub use word::WordConverter;
