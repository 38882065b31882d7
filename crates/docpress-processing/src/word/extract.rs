//! Plain-text extraction from Office Open XML documents.
//!
//! Only the main document part is read. Formatting, images, headers and
//! footers are dropped; table cells come out as ordinary paragraphs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{ConversionError, ConvertResult};
use crate::sniff::{sniff_document, DocumentFormat};

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the inflated size of the document part.
const MAX_DOCUMENT_PART_BYTES: u64 = 256 * 1024 * 1024;

/// Extract the raw text of a Word document.
///
/// Paragraphs are separated by a blank line, `w:tab` becomes `\t` and
/// `w:br`/`w:cr` become `\n`.
pub fn extract_text(data: &[u8]) -> ConvertResult<String> {
    match sniff_document(data) {
        DocumentFormat::OfficeOpenXml => {}
        DocumentFormat::OfficeLegacy => {
            return Err(ConversionError::UnsupportedFormat(
                "legacy binary .doc documents cannot be read".to_string(),
            ))
        }
        other => {
            return Err(ConversionError::UnsupportedFormat(format!(
                "expected a .docx container, found {}",
                other.as_str()
            )))
        }
    }

    let xml = read_document_part(data)?;
    text_from_document_xml(&xml)
}

fn read_document_part(data: &[u8]) -> ConvertResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ConversionError::Extraction(format!("Invalid .docx archive: {}", e)))?;

    let part = archive.by_name(DOCUMENT_PART).map_err(|e| {
        ConversionError::Extraction(format!("Missing {}: {}", DOCUMENT_PART, e))
    })?;

    let mut xml = String::new();
    part.take(MAX_DOCUMENT_PART_BYTES)
        .read_to_string(&mut xml)
        .map_err(|e| ConversionError::Extraction(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;

    Ok(xml)
}

/// Walk `word/document.xml` and collect the visible text.
pub(crate) fn text_from_document_xml(xml: &str) -> ConvertResult<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut out = String::new();
    let mut in_text = false;
    // Tab stop definitions inside w:pPr/w:tabs are not content.
    let mut tabs_depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ConversionError::Extraction(format!("Malformed document XML: {}", e)))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"tabs" => tabs_depth += 1,
                b"tab" if tabs_depth == 0 => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if tabs_depth == 0 => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                b"p" => out.push_str("\n\n"),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ConversionError::Extraction(format!("Bad text run: {}", e)))?;
                out.push_str(&text);
            }
            Event::CData(t) if in_text => {
                out.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"tabs" => tabs_depth = tabs_depth.saturating_sub(1),
                b"p" => out.push_str("\n\n"),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let trimmed_len = out.trim_end_matches('\n').len();
    out.truncate(trimmed_len);
    Ok(out)
}
