//! Test fixtures: real .docx containers and images built in memory, and a
//! reader for the text drawn in generated PDFs.

use std::io::{Cursor, Write};

use axum_test::multipart::{MultipartForm, Part};
use image::{ImageFormat, Rgb, RgbImage};
use lopdf::content::Content;
use lopdf::{Document, Object};
use zip::write::{FileOptions, ZipWriter};

pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC: &str = "application/msword";

/// A minimal .docx whose body holds one paragraph per entry.
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        zip.start_file("[Content_Types].xml", FileOptions::default())
            .unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .unwrap();
        zip.start_file("word/document.xml", FileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buffer
}

/// Bytes carrying the OLE compound file signature of a legacy .doc.
pub fn legacy_doc() -> Vec<u8> {
    let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    bytes.resize(512, 0);
    bytes
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 120, 220]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Multipart form with a single `file` field.
pub fn file_form(data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("file", part)
}

/// Concatenated `Tj` strings of every page, as Latin-1 text.
pub fn pdf_text(pdf: &[u8]) -> String {
    let doc = Document::load_mem(pdf).expect("response is not a PDF");
    let mut text = String::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        for op in content.operations {
            if op.operator == "Tj" {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    text.extend(bytes.iter().map(|&b| b as char));
                }
            }
        }
    }
    text
}

pub fn pdf_page_count(pdf: &[u8]) -> usize {
    Document::load_mem(pdf)
        .expect("response is not a PDF")
        .get_pages()
        .len()
}

/// `[width, height]` of the first page's MediaBox.
pub fn pdf_media_box(pdf: &[u8]) -> (f32, f32) {
    let doc = Document::load_mem(pdf).expect("response is not a PDF");
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    (
        media_box[2].as_float().unwrap(),
        media_box[3].as_float().unwrap(),
    )
}

pub fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Pixel `(width, height)` of the first image XObject.
pub fn pdf_image_size(pdf: &[u8]) -> (i64, i64) {
    let doc = Document::load_mem(pdf).expect("response is not a PDF");
    let stream = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .find(|s| {
            s.dict
                .get(b"Subtype")
                .and_then(|v| v.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false)
        })
        .expect("no image in PDF");
    (
        stream.dict.get(b"Width").unwrap().as_i64().unwrap(),
        stream.dict.get(b"Height").unwrap().as_i64().unwrap(),
    )
}
