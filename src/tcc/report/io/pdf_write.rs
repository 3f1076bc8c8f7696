use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::info;

use crate::tcc::report::error::{ReportError, Result};
use crate::tcc::report::io::pdf_read::SourceDocument;

/// Handle to a source document whose objects have been renumbered into the
/// output id space. Page order is preserved from the source.
pub struct ImportedPages {
    page_ids: Vec<ObjectId>,
}

/// Builds the assembled output PDF.
///
/// Sources are imported once each, pages are appended as independent copies
/// of the source page dictionaries, and the document is serialized exactly
/// once by [`save`](OutputAssembler::save).
pub struct OutputAssembler {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl OutputAssembler {
    pub fn new() -> Self {
        Self {
            document: Document::with_version("1.5"),
            page_ids: Vec::new(),
        }
    }

    /// Moves a source document's objects into the output, renumbered past
    /// everything already present. The source's catalog and page-tree
    /// structure is dropped; the output grows its own on save.
    pub fn import(&mut self, source: SourceDocument) -> ImportedPages {
        let mut document = source.into_document();
        document.renumber_objects_with(self.document.max_id + 1);
        self.document.max_id = document.max_id;

        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        for (object_id, object) in document.objects {
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" | b"Outlines" | b"Outline" => {}
                _ => {
                    self.document.objects.insert(object_id, object);
                }
            }
        }

        ImportedPages { page_ids }
    }

    /// Appends a copy of the given source page to the output.
    pub fn append_page(&mut self, source: &ImportedPages, index: usize) -> Result<()> {
        let page_id = source
            .page_ids
            .get(index)
            .copied()
            .ok_or(ReportError::PageOutOfRange {
                index,
                count: source.page_ids.len(),
            })?;
        let object = self.document.get_object(page_id)?.clone();
        let Object::Dictionary(mut dictionary) = object else {
            return Err(ReportError::MalformedPage { index });
        };
        dictionary.remove(b"Parent");
        let copy_id = self.document.add_object(Object::Dictionary(dictionary));
        self.page_ids.push(copy_id);
        Ok(())
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Builds the page tree and catalog, then writes the document to `path`.
    /// Returns the number of pages written.
    pub fn save(mut self, path: &Path) -> Result<usize> {
        let pages_id = self.document.new_object_id();
        for &page_id in &self.page_ids {
            if let Ok(Object::Dictionary(dictionary)) = self.document.get_object_mut(page_id) {
                dictionary.set("Parent", Object::Reference(pages_id));
            }
        }

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&page_id| Object::Reference(page_id))
            .collect();
        let page_count = self.page_ids.len();
        let pages_dictionary = Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(page_count as i64)),
        ]);
        self.document
            .objects
            .insert(pages_id, Object::Dictionary(pages_dictionary));

        let catalog_id = self.document.new_object_id();
        let catalog_dictionary = Dictionary::from_iter([
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        self.document
            .objects
            .insert(catalog_id, Object::Dictionary(catalog_dictionary));
        self.document.trailer.set("Root", Object::Reference(catalog_id));

        self.document.renumber_objects();
        self.document.compress();
        self.document.save(path)?;
        info!(path = %path.display(), pages = page_count, "wrote assembled PDF");
        Ok(page_count)
    }
}

impl Default for OutputAssembler {
    fn default() -> Self {
        Self::new()
    }
}
