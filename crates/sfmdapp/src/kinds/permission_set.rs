//! Permission sets: creation and the label, description and license fields.
//!
//! Permission grants are edited through [`super::permissions`], the same as
//! for profiles.

use crate::document::Document;
use crate::error::Result;
use crate::ops::patch::Patch;
use crate::schema::kinds::PERMISSION_SET;
use crate::store;
use std::path::Path;

pub fn open(path: &Path) -> Result<Document> {
    store::open(path, &PERMISSION_SET)
}

/// A fresh permission set with activation not required.
pub fn new(label: &str, description: Option<&str>) -> Document {
    let mut doc = Document::new(&PERMISSION_SET);
    doc.set_leaf("hasActivationRequired", false);
    doc.set_leaf("label", label);
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        doc.set_leaf("description", description);
    }
    doc
}

/// Top-level fields to overwrite. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSetEdit {
    pub license: Option<String>,
    pub description: Option<String>,
    pub label: Option<String>,
}

impl PermissionSetEdit {
    pub fn patch(&self) -> Patch {
        Patch::new()
            .set_opt("license", self.license.clone())
            .set_opt("description", self.description.clone())
            .set_opt("label", self.label.clone())
    }
}

pub fn edit(doc: &mut Document, edit: &PermissionSetEdit) {
    edit.patch().apply(doc.root_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::Leaf;

    #[test]
    fn new_sets_defaults() {
        let doc = new("Support", None);
        assert_eq!(doc.leaf("hasActivationRequired"), Leaf::text("false"));
        assert_eq!(doc.leaf("label"), Leaf::text("Support"));
        assert!(doc.leaf("description").is_absent());
        let text = doc.encode();
        assert!(text.find("<hasActivationRequired>").unwrap() < text.find("<label>").unwrap());
    }

    #[test]
    fn new_with_description_orders_it_first() {
        let doc = new("Support", Some("Support staff"));
        let text = doc.encode();
        assert!(text.find("<description>").unwrap() < text.find("<hasActivationRequired>").unwrap());
    }

    #[test]
    fn edit_only_touches_given_fields() {
        let mut doc = new("Support", Some("Old"));
        edit(
            &mut doc,
            &PermissionSetEdit {
                license: Some("Salesforce".into()),
                ..Default::default()
            },
        );
        assert_eq!(doc.leaf("license"), Leaf::text("Salesforce"));
        assert_eq!(doc.leaf("description"), Leaf::text("Old"));
        assert_eq!(doc.leaf("label"), Leaf::text("Support"));
    }
}
