use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat};

use super::document::{save_document, PdfBuilder};
use super::encoding::encode_win_ansi;
use super::layout::PageLayout;
use crate::error::ConvertResult;

const FONT_NAME: &str = "F1";

/// Lays plain text onto Helvetica pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPdfWriter {
    layout: PageLayout,
}

impl TextPdfWriter {
    pub fn new(layout: PageLayout) -> Self {
        TextPdfWriter { layout }
    }

    /// Build the document in memory.
    pub fn render(&self, text: &str) -> ConvertResult<Document> {
        let layout = &self.layout;
        let mut builder = PdfBuilder::new();

        let font_id = builder.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        for page in layout.paginate(text) {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![FONT_NAME.into(), layout.font_size.into()]),
            ];

            for line in page.iter().filter(|l| !l.text.is_empty()) {
                operations.push(Operation::new(
                    "Tm",
                    vec![
                        Object::Integer(1),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(1),
                        line.x.into(),
                        line.baseline.into(),
                    ],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
                ));
            }
            operations.push(Operation::new("ET", vec![]));

            let resources = dictionary! {
                "Font" => dictionary! { FONT_NAME => font_id },
            };
            builder.add_page(
                layout.page_width,
                layout.page_height,
                Content { operations },
                resources,
            )?;
        }

        builder.finish()
    }

    /// Render `text` and write it to a new file at `path`. Blocking.
    pub fn write_file(&self, text: &str, path: &Path) -> ConvertResult<u64> {
        let mut doc = self.render(text)?;
        save_document(&mut doc, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_strings(doc: &Document) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        for (_, page_id) in doc.get_pages() {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            for op in content.operations {
                if op.operator == "Tj" {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        out.push(bytes.clone());
                    }
                }
            }
        }
        out
    }

    fn reload(doc: &mut Document) -> Document {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        Document::load_mem(&bytes).unwrap()
    }

    #[test]
    fn test_text_survives_round_trip() {
        let writer = TextPdfWriter::default();
        let text = "Quarterly report (draft)\n\nRevenue grew by 12% \\ year.";
        let doc = reload(&mut writer.render(text).unwrap());

        let rendered: Vec<u8> = page_strings(&doc).concat();
        let expected: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
        let actual: Vec<u8> = rendered
            .into_iter()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_long_text_spans_multiple_pages() {
        let writer = TextPdfWriter::default();
        let text = "paragraph text that keeps going\n".repeat(200);
        let doc = reload(&mut writer.render(&text).unwrap());
        assert!(doc.get_pages().len() > 2);
    }

    #[test]
    fn test_empty_text_still_produces_a_page() {
        let doc = reload(&mut TextPdfWriter::default().render("").unwrap());
        assert_eq!(doc.get_pages().len(), 1);
        assert!(page_strings(&doc).is_empty());
    }

    #[test]
    fn test_write_file_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let size = TextPdfWriter::default().write_file("Hello", &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(size, bytes.len() as u64);
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }
}
