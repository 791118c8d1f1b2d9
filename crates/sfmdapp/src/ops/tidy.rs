//! Canonicalization.
//!
//! `tidy` walks the document against its schema and puts every collection in
//! its canonical order, collapsing exact duplicates where the collection asks
//! for it. Nested records are tidied before the collection that holds them, so
//! one pass reaches a fixed point.

use super::collection::{dedup_preserving_order, sort_canonical};
use crate::document::Document;
use crate::error::Result;
use crate::schema::{CanonicalOrder, CollectionSpec, RecordSchema};
use crate::xml::element::Element;
use std::collections::HashMap;

/// Member lists of a reference package manifest, by type name, in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    members: HashMap<String, Vec<String>>,
}

impl Manifest {
    /// Reads the `types` blocks of a package document.
    pub fn from_package(doc: &Document) -> Self {
        let mut members: HashMap<String, Vec<String>> = HashMap::new();
        for types in doc.records("types") {
            let name = types.leaf("name").display_text().to_string();
            let list = members.entry(name).or_default();
            list.extend(types.children_named("members").map(|m| m.text_content().to_string()));
        }
        Self { members }
    }

    pub fn members(&self, type_name: &str) -> Option<&[String]> {
        self.members.get(type_name).map(Vec::as_slice)
    }
}

/// Puts `doc` in canonical form. Content the schema does not model is kept
/// as it is.
pub fn tidy(doc: &mut Document, manifest: Option<&Manifest>) -> Result<()> {
    let kind = doc.kind();
    if let Some(hook) = kind.tidy_hook {
        hook(doc.root_mut());
    }
    tidy_record(doc.root_mut(), kind.root, manifest);
    Ok(())
}

fn tidy_record(record: &mut Element, schema: &RecordSchema, manifest: Option<&Manifest>) {
    // A record-shaped field holding text has nothing to order.
    if schema.fields.is_empty() || !record.is_record() {
        return;
    }
    for child in record.children_mut() {
        if let Some(nested) = schema.field(&child.name).and_then(|f| f.nested()) {
            tidy_record(child, nested, manifest);
        }
    }
    for field in schema.fields {
        if let Some(spec) = field.collection() {
            if record.children_named(field.name).next().is_some() {
                record.with_collection(field.name, |items| order_collection(items, spec, manifest));
            }
        }
    }
}

fn order_collection(items: &mut Vec<Element>, spec: &CollectionSpec, manifest: Option<&Manifest>) {
    match spec.order {
        CanonicalOrder::ByKey => sort_canonical(items, |r| spec.key_of(r), spec.dedup),
        CanonicalOrder::Manifest(type_name) => match manifest.and_then(|m| m.members(type_name)) {
            Some(order) => {
                let position = |r: &Element| {
                    let text = r.text_content();
                    order.iter().position(|m| m == text).unwrap_or(usize::MAX)
                };
                sort_canonical(items, |r| (position(r), spec.key_of(r)), spec.dedup);
            }
            None if spec.dedup => dedup_preserving_order(items),
            None => {}
        },
        CanonicalOrder::Preserve if spec.dedup => dedup_preserving_order(items),
        CanonicalOrder::Preserve => {}
    }
}
