use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info};

use crate::tcc::report::error::Result;

/// Page-tree attributes that may live on an ancestor node instead of the
/// page dictionary itself.
const INHERITED_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// An input PDF opened read-only for the duration of a merge run.
pub struct SourceDocument {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Loads a PDF and snapshots its page order. Inheritable page-tree
    /// attributes are copied down onto each page dictionary so that pages
    /// stay self-contained when copied into another document.
    pub fn load(path: &Path) -> Result<Self> {
        let mut document = Document::load(path)?;
        flatten_inherited_attributes(&mut document);
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        info!(path = %path.display(), pages = page_ids.len(), "loaded PDF");
        Ok(Self { document, page_ids })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Releases the underlying document for assembly.
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Extracts the plain text of every page, in page order.
///
/// This is a single streaming pass over the whole document; the layout
/// decoder accumulates state (fonts, resources) across pages, so extraction
/// happens once per document rather than once per page. Malformed input
/// surfaces as a fatal extraction error.
pub fn page_texts(path: &Path) -> Result<Vec<String>> {
    info!(path = %path.display(), "extracting page text");
    let texts = pdf_extract::extract_text_by_pages(path)?;
    debug!(pages = texts.len(), "page text extracted");
    Ok(texts)
}

fn flatten_inherited_attributes(document: &mut Document) {
    let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
    let mut resolved: Vec<(ObjectId, Vec<u8>, Object)> = Vec::new();

    for &page_id in &page_ids {
        for key in INHERITED_PAGE_KEYS {
            let Ok(dictionary) = document.get_dictionary(page_id) else {
                continue;
            };
            if dictionary.has(key) {
                continue;
            }
            if let Some(value) = inherited_value(document, page_id, key) {
                resolved.push((page_id, key.to_vec(), value));
            }
        }
    }

    for (page_id, key, value) in resolved {
        if let Ok(Object::Dictionary(dictionary)) = document.get_object_mut(page_id) {
            dictionary.set(key, value);
        }
    }
}

fn inherited_value(document: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = document.get_dictionary(page_id).ok()?;
    // Page trees are shallow; the cap keeps a malformed Parent cycle finite.
    for _ in 0..32 {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = document.get_dictionary(parent_id).ok()?;
    }
    None
}
