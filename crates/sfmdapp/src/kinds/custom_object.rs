//! Custom and standard objects: fields, field sets, record types and
//! validation rules. Every one of these collections is keyed by `fullName`.

use crate::document::Document;
use crate::error::Result;
use crate::ops::collection::Filtered;
use crate::ops::filter::{Condition, Filter};
use crate::ops::patch::Patch;
use crate::schema::kinds::CUSTOM_OBJECT;
use crate::schema::RecordKey;
use crate::store;
use crate::xml::element::Element;
use std::path::Path;

pub const FIELDS: &str = "fields";
pub const FIELD_SETS: &str = "fieldSets";
pub const RECORD_TYPES: &str = "recordTypes";
pub const VALIDATION_RULES: &str = "validationRules";

/// Standard fields that are required whether or not the file says so.
const ALWAYS_REQUIRED: &[&str] = &["Name", "OwnerId"];

pub fn open(path: &Path) -> Result<Document> {
    store::open(path, &CUSTOM_OBJECT)
}

pub fn is_required(field: &Element) -> bool {
    let name = field.leaf("fullName");
    ALWAYS_REQUIRED.contains(&name.display_text())
        || field.leaf("required").to_bool()
        || field.leaf("type").as_str() == Some("MasterDetail")
}

pub fn list_fields(doc: &Document, required_only: bool) -> impl Iterator<Item = &Element> + '_ {
    doc.filter(FIELDS, &Filter::all())
        .filter(move |f| !required_only || is_required(f))
}

/// Field attributes to overwrite. `None` leaves the attribute as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEdit {
    pub label: Option<String>,
    pub unique: Option<bool>,
    pub external_id: Option<bool>,
}

impl FieldEdit {
    pub fn patch(&self) -> Patch {
        Patch::new()
            .set_opt("label", self.label.clone())
            .set_opt_bool("unique", self.unique)
            .set_opt_bool("externalId", self.external_id)
    }
}

pub fn update_field(doc: &mut Document, name: &str, edit: &FieldEdit) -> Result<()> {
    doc.update(FIELDS, &RecordKey::single(name), &edit.patch())
}

pub fn delete_field(doc: &mut Document, name: &str) -> Result<()> {
    doc.delete_key(FIELDS, &RecordKey::single(name))
}

pub fn list_field_sets(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(FIELD_SETS, &Filter::all())
}

pub fn delete_field_set(doc: &mut Document, name: &str) -> Result<()> {
    doc.delete_key(FIELD_SETS, &RecordKey::single(name))
}

pub fn list_record_types(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(RECORD_TYPES, &Filter::all())
}

pub fn delete_record_type(doc: &mut Document, name: &str) -> Result<()> {
    doc.delete_key(RECORD_TYPES, &RecordKey::single(name))
}

pub fn list_validation_rules(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(VALIDATION_RULES, &Filter::all())
}

pub fn delete_validation_rule(doc: &mut Document, name: &str) -> Result<()> {
    doc.delete_key(VALIDATION_RULES, &RecordKey::single(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MdError;
    use crate::leaf::Leaf;

    fn field(name: &str) -> Element {
        Element::record(FIELDS).with_leaf("fullName", name)
    }

    fn object() -> Document {
        let mut doc = Document::new(&CUSTOM_OBJECT);
        doc.root_mut().push(field("Name"));
        doc.root_mut().push(
            field("Parent__c")
                .with_leaf("label", "Parent")
                .with_leaf("type", "MasterDetail"),
        );
        doc.root_mut().push(field("Code__c").with_leaf("required", true));
        doc.root_mut().push(field("Notes__c").with_leaf("required", false));
        doc
    }

    fn names<'a>(fields: impl Iterator<Item = &'a Element>) -> Vec<String> {
        fields.map(|f| f.leaf("fullName").display_text().to_string()).collect()
    }

    #[test]
    fn required_fields() {
        let doc = object();
        assert_eq!(names(list_fields(&doc, true)), vec!["Name", "Parent__c", "Code__c"]);
        assert_eq!(list_fields(&doc, false).count(), 4);
    }

    #[test]
    fn update_field_keeps_unrelated_attributes() {
        let mut doc = object();
        let edit = FieldEdit {
            unique: Some(false),
            external_id: Some(true),
            ..Default::default()
        };
        update_field(&mut doc, "Parent__c", &edit).unwrap();
        let parent = doc.find(FIELDS, &RecordKey::single("Parent__c")).unwrap().unwrap();
        assert_eq!(parent.leaf("label"), Leaf::text("Parent"));
        assert_eq!(parent.leaf("unique"), Leaf::text("false"));
        assert_eq!(parent.leaf("externalId"), Leaf::text("true"));

        assert!(matches!(
            update_field(&mut doc, "Missing__c", &edit),
            Err(MdError::NotFound(_))
        ));
    }

    #[test]
    fn delete_field_then_missing() {
        let mut doc = object();
        delete_field(&mut doc, "Notes__c").unwrap();
        assert_eq!(list_fields(&doc, false).count(), 3);
        assert!(delete_field(&mut doc, "Notes__c").is_err());
    }

    #[test]
    fn field_sets_record_types_and_rules() {
        let mut doc = Document::new(&CUSTOM_OBJECT);
        doc.root_mut()
            .push(Element::record(FIELD_SETS).with_leaf("fullName", "Summary"));
        doc.root_mut()
            .push(Element::record(RECORD_TYPES).with_leaf("fullName", "Partner"));
        doc.root_mut()
            .push(Element::record(VALIDATION_RULES).with_leaf("fullName", "Code_Required"));

        assert_eq!(list_field_sets(&doc).count(), 1);
        assert_eq!(list_record_types(&doc).count(), 1);
        assert_eq!(list_validation_rules(&doc).count(), 1);

        delete_field_set(&mut doc, "Summary").unwrap();
        delete_record_type(&mut doc, "Partner").unwrap();
        delete_validation_rule(&mut doc, "Code_Required").unwrap();
        assert!(doc.root().children().is_empty());
    }
}
