//! Package manifests: `types` blocks of `members` grouped by type `name`.

use crate::document::Document;
use crate::error::{MdError, Result};
use crate::ops::collection;
use crate::ops::tidy::tidy;
use crate::schema::kinds::PACKAGE;
use crate::store;
use crate::xml::element::Element;
use std::path::Path;

pub const TYPES: &str = "types";
pub const MEMBERS: &str = "members";

pub fn open(path: &Path) -> Result<Document> {
    store::open(path, &PACKAGE)
}

pub fn new(api_version: &str) -> Document {
    let mut doc = Document::new(&PACKAGE);
    doc.set_leaf("version", api_version);
    doc
}

/// Adds `member` under `type_name`, creating the type block if needed.
pub fn add(doc: &mut Document, type_name: &str, member: &str) -> Result<()> {
    doc.root_mut().with_collection(TYPES, |blocks| {
        let at = match blocks.iter().position(|b| is_type(b, type_name)) {
            Some(at) => at,
            None => {
                blocks.push(Element::record(TYPES).with_leaf("name", type_name));
                blocks.len() - 1
            }
        };
        blocks[at].with_collection(MEMBERS, |members| {
            collection::add(members, Element::text_leaf(MEMBERS, member), |m| m.text_content().to_string())
        })
    })
    .map_err(|_| MdError::already_exists(format!("{type_name}: {member}")))?;
    tidy(doc, None)?;
    Ok(())
}

/// Removes `member` from `type_name`. A type block left without members is
/// removed too.
pub fn delete(doc: &mut Document, type_name: &str, member: &str) -> Result<()> {
    let removed = doc.root_mut().with_collection(TYPES, |blocks| {
        let mut removed = 0;
        for block in blocks.iter_mut().filter(|b| is_type(b, type_name)) {
            removed += block.with_collection(MEMBERS, |members| {
                collection::delete(members, |m: &Element| m.text_content() == member)
            });
        }
        blocks.retain(|b| !is_type(b, type_name) || b.children_named(MEMBERS).next().is_some());
        removed
    });
    if removed == 0 {
        return Err(MdError::not_found(format!("{type_name}: {member}")));
    }
    Ok(())
}

/// Every `(type, member)` pair in document order.
pub fn list(doc: &Document) -> Vec<(String, String)> {
    doc.records(TYPES)
        .flat_map(|block| {
            let name = block.leaf("name").display_text().to_string();
            block
                .children_named(MEMBERS)
                .map(move |m| (name.clone(), m.text_content().to_string()))
        })
        .collect()
}

/// Folds `types` blocks that share a name into the first of them.
pub fn merge_types(root: &mut Element) {
    root.with_collection(TYPES, |blocks| {
        let mut merged: Vec<Element> = Vec::with_capacity(blocks.len());
        for block in blocks.drain(..) {
            let name = block.leaf("name");
            match merged.iter_mut().find(|m| m.leaf("name") == name) {
                Some(target) => {
                    let members = block.children_named(MEMBERS).cloned().collect::<Vec<_>>();
                    target.with_collection(MEMBERS, |existing| existing.extend(members));
                }
                None => merged.push(block),
            }
        }
        *blocks = merged;
    });
}

fn is_type(block: &Element, type_name: &str) -> bool {
    block.leaf("name").as_str() == Some(type_name)
}
