//! Custom permissions.

use crate::document::Document;
use crate::error::Result;
use crate::schema::kinds::CUSTOM_PERMISSION;
use crate::store;
use std::path::Path;

pub fn open(path: &Path) -> Result<Document> {
    store::open(path, &CUSTOM_PERMISSION)
}

pub fn new(label: &str) -> Document {
    let mut doc = Document::new(&CUSTOM_PERMISSION);
    doc.set_leaf("label", label);
    doc
}

/// Sets the description; an empty string is written as an empty element.
pub fn edit_description(doc: &mut Document, description: &str) {
    doc.set_leaf("description", description);
}
