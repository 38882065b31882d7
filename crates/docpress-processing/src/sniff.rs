//! Document format detection from magic bytes

/// Container format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// ZIP-based Office Open XML (.docx)
    OfficeOpenXml,
    /// OLE2 compound file (legacy .doc)
    OfficeLegacy,
    Pdf,
    Unknown,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::OfficeOpenXml => "office",
            DocumentFormat::OfficeLegacy => "office_legacy",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Unknown => "unknown",
        }
    }
}

/// Determine format from magic bytes. The declared media type is not
/// consulted.
pub fn sniff_document(data: &[u8]) -> DocumentFormat {
    if data.starts_with(b"PK\x03\x04") {
        DocumentFormat::OfficeOpenXml
    } else if data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) {
        DocumentFormat::OfficeLegacy
    } else if data.starts_with(b"%PDF") {
        DocumentFormat::Pdf
    } else {
        DocumentFormat::Unknown
    }
}
