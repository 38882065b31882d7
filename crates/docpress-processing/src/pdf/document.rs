use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{ConversionError, ConvertResult};

const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = "docpress";

/// Builds a flat page tree: one catalog, one `Pages` node, N pages.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        PdfBuilder {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    pub fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        self.doc.add_object(object)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append a page of the given size drawing `content` with `resources`.
    pub fn add_page(
        &mut self,
        width: f32,
        height: f32,
        content: Content,
        resources: Dictionary,
    ) -> ConvertResult<ObjectId> {
        let encoded = content.encode()?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    /// Close the page tree and return the document.
    pub fn finish(mut self) -> ConvertResult<Document> {
        if self.page_ids.is_empty() {
            return Err(ConversionError::Generation(
                "Document has no pages".to_string(),
            ));
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        Ok(self.doc)
    }
}

/// Write `doc` to `path`, filling the file reserved for it, and return its
/// size in bytes.
///
/// Blocking; call from `spawn_blocking`.
pub(crate) fn save_document(doc: &mut Document, path: &Path) -> ConvertResult<u64> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            ConversionError::Generation(format!("Failed to open {}: {}", path.display(), e))
        })?;

    let mut writer = BufWriter::new(file);
    doc.save_to(&mut writer)
        .map_err(|e| ConversionError::Generation(format!("Failed to write PDF: {}", e)))?;
    writer
        .flush()
        .map_err(|e| ConversionError::Generation(format!("Failed to flush PDF: {}", e)))?;

    let size = std::fs::metadata(path)?.len();
    Ok(size)
}
