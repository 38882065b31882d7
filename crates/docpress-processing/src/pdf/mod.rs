//! PDF generation shared by the converters.

mod document;
mod encoding;
mod layout;
mod text;

pub use document::PdfBuilder;
pub(crate) use document::save_document;
pub use encoding::{encode_win_ansi, helvetica_width};
pub use layout::PageLayout;
pub use text::TextPdfWriter;
