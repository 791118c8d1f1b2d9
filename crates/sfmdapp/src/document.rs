//! # Documents
//!
//! A [`Document`] is one metadata file in memory: the kind schema it was
//! opened as plus the owned root [`Element`]. Documents are created by
//! [`crate::store::open`] or by a kind's `new` constructor, mutated in place,
//! and handed back to the store for writing.
//!
//! The collection methods here are thin bindings of the generic operations in
//! [`crate::ops::collection`]: they look up the collection's [`CollectionSpec`]
//! in the kind schema, pull the records out with
//! [`Element::with_collection`], and run the generic operation with the
//! schema's key function.

use crate::error::{MdError, Result};
use crate::leaf::Leaf;
use crate::ops::collection::{self, Filtered, ZeroMatch};
use crate::ops::filter::{Condition, Filter, Predicate};
use crate::ops::patch::Patch;
use crate::schema::kinds::METADATA_NAMESPACE;
use crate::schema::{CollectionSpec, KindSchema, RecordKey, RecordSchema};
use crate::xml::element::Element;
use crate::xml::encode;

#[derive(Debug, Clone)]
pub struct Document {
    kind: &'static KindSchema,
    root: Element,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.kind, other.kind) && self.root == other.root
    }
}

impl Document {
    /// An empty document of `kind` in the metadata namespace.
    pub fn new(kind: &'static KindSchema) -> Self {
        Self {
            kind,
            root: Element::record(kind.name).with_attr("xmlns", METADATA_NAMESPACE),
        }
    }

    pub fn from_root(kind: &'static KindSchema, root: Element) -> Self {
        Self { kind, root }
    }

    pub fn kind(&self) -> &'static KindSchema {
        self.kind
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn leaf(&self, field: &str) -> Leaf {
        self.root.leaf(field)
    }

    pub fn set_leaf(&mut self, field: &str, value: impl Into<Leaf>) {
        self.root.set_leaf(field, &value.into());
    }

    /// Collection spec declared for `collection` on this kind's root record.
    pub fn spec(&self, collection: &str) -> Result<CollectionSpec> {
        self.kind
            .root
            .collection(collection)
            .copied()
            .ok_or_else(|| MdError::not_found(format!("{} collection {}", self.kind.name, collection)))
    }

    /// Schema of the records in `collection`, if they are records.
    pub fn record_schema(&self, collection: &str) -> Option<&'static RecordSchema> {
        self.kind.root.field(collection).and_then(|f| f.nested())
    }

    pub fn records<'a>(&'a self, collection: &'a str) -> impl Iterator<Item = &'a Element> + Clone + 'a {
        self.root.children_named(collection)
    }

    /// Records of `collection` that satisfy `filter`, in document order.
    pub fn filter(&self, collection: &str, filter: &Filter) -> Filtered<'_, Element, Condition> {
        let conditions = filter
            .clone()
            .with(Condition::Tag(collection.to_string()))
            .into_conditions();
        collection::filter(self.root.children(), conditions)
    }

    pub fn find<'a>(&'a self, collection: &'a str, key: &RecordKey) -> Result<Option<&'a Element>> {
        let spec = self.spec(collection)?;
        Ok(self.records(collection).find(|r| spec.key_of(r) == *key))
    }

    /// Adds a record. Unique collections reject an existing key; repeatable
    /// ones reject only an exact duplicate.
    pub fn add(&mut self, collection: &str, record: Element) -> Result<()> {
        let spec = self.spec(collection)?;
        self.root.with_collection(collection, |items| {
            if spec.unique {
                collection::add(items, record, |r| spec.key_of(r))
            } else if items.contains(&record) {
                Err(MdError::already_exists(spec.key_of(&record).to_string()))
            } else {
                collection::add_unchecked(items, record);
                Ok(())
            }
        })
    }

    /// Merges `patch` into the record keyed `key`.
    pub fn update(&mut self, collection: &str, key: &RecordKey, patch: &Patch) -> Result<()> {
        let spec = self.spec(collection)?;
        self.root.with_collection(collection, |items| {
            collection::update(items, key, |r| spec.key_of(r), |r| patch.apply(r))
        })
    }

    pub fn delete(&mut self, collection: &str, filter: &Filter, zero: ZeroMatch) -> Result<usize> {
        let what = format!("{collection} matching filter");
        self.root.with_collection(collection, |items| {
            collection::delete_matching(items, |r: &Element| filter.matches(r), zero, what)
        })
    }

    /// Deletes the record keyed `key`; a missing key is `NotFound`.
    pub fn delete_key(&mut self, collection: &str, key: &RecordKey) -> Result<()> {
        let spec = self.spec(collection)?;
        let filter = Filter::all().with(Condition::key(spec, key.clone()));
        self.root.with_collection(collection, |items| {
            collection::delete_matching(items, |r: &Element| filter.matches(r), ZeroMatch::Error, key)
                .map(|_| ())
        })
    }

    pub fn reset(&mut self, collection: &str, filter: &Filter, reset_fn: impl FnMut(&mut Element)) -> usize {
        self.root
            .with_collection(collection, |items| {
                collection::reset(items, |r: &Element| filter.matches(r), reset_fn)
            })
    }

    pub fn clone_record(&mut self, collection: &str, src: &RecordKey, dest: &RecordKey) -> Result<()> {
        let spec = self.spec(collection)?;
        self.root.with_collection(collection, |items| {
            collection::clone_record(items, src, dest, |r| spec.key_of(r), |r, k| spec.rekey(r, k))
        })
    }

    /// Canonical bytes of the whole document.
    pub fn encode(&self) -> String {
        encode::encode_document(&self.root, Some(self.kind.root))
    }

    /// Canonical rendering of one record of `collection`, for display.
    pub fn render_record(&self, collection: &str, record: &Element) -> String {
        encode::encode_fragment(record, self.record_schema(collection))
    }
}
