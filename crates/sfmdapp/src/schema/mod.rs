//! # Document Schemas
//!
//! Every document kind is described by data rather than by its own Rust type.
//! A [`KindSchema`] names the root element and points at a [`RecordSchema`]:
//! the ordered list of fields a record may contain. The order of that list is
//! the order fields are written in, whatever order they were read or edited in.
//!
//! A field has a [`Shape`]:
//!
//! - `Leaf`: a single optional text element (`<custom>false</custom>`)
//! - `Record`: a single nested record (`<oauthConfig>...</oauthConfig>`)
//! - `Leaves`: a repeated text element (`<members>Account</members>`)
//! - `Records`: a repeated nested record (`<objectPermissions>...</objectPermissions>`)
//!
//! Repeated fields carry a [`CollectionSpec`] describing the natural key of
//! their records, whether the key is unique, and the canonical order used by
//! tidy. The per-kind tables live in [`kinds`].

use crate::leaf::Leaf;
use crate::xml::element::Element;
use std::fmt;

pub mod kinds;

/// Natural key of a record: one leaf per key field, in key-field order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(pub Vec<Leaf>);

impl RecordKey {
    pub fn single(value: impl Into<String>) -> Self {
        RecordKey(vec![Leaf::text(value)])
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.0.iter().filter_map(Leaf::as_str).collect();
        f.write_str(&parts.join(", "))
    }
}

/// How tidy orders a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalOrder {
    /// Leave records in document order.
    Preserve,
    /// Lexicographic by natural key.
    ByKey,
    /// Declaration order of the named member type in a reference package
    /// manifest; records not listed there follow in key order. Without a
    /// manifest the collection is left as is.
    Manifest(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    /// Leaf fields that form the natural key. Empty means the element's own
    /// text is the key (text-list collections such as package members).
    pub key: &'static [&'static str],
    /// At most one record per key.
    pub unique: bool,
    pub order: CanonicalOrder,
    /// Tidy collapses records that are exactly equal.
    pub dedup: bool,
}

impl CollectionSpec {
    pub const fn unique(key: &'static [&'static str]) -> Self {
        Self {
            key,
            unique: true,
            order: CanonicalOrder::ByKey,
            dedup: true,
        }
    }

    pub const fn repeated(key: &'static [&'static str]) -> Self {
        Self {
            key,
            unique: false,
            order: CanonicalOrder::ByKey,
            dedup: true,
        }
    }

    /// A list of text elements keyed by their own text.
    pub const fn text() -> Self {
        Self::unique(&[])
    }

    pub const fn ordered(self, order: CanonicalOrder) -> Self {
        Self { order, ..self }
    }

    pub fn key_of(&self, record: &Element) -> RecordKey {
        if self.key.is_empty() {
            return RecordKey::single(record.text_content());
        }
        RecordKey(self.key.iter().map(|field| record.leaf(field)).collect())
    }

    /// Rewrites the key fields of `record` so that `key_of` returns `key`.
    pub fn rekey(&self, record: &mut Element, key: &RecordKey) {
        if self.key.is_empty() {
            let text = key.0.first().map(Leaf::display_text).unwrap_or("");
            record.body = crate::xml::element::Body::Text(text.to_string());
            return;
        }
        for (field, value) in self.key.iter().zip(&key.0) {
            record.set_leaf(field, value);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Leaf,
    Record(&'static RecordSchema),
    Leaves(CollectionSpec),
    Records(&'static RecordSchema, CollectionSpec),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
}

impl FieldSpec {
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            shape: Shape::Leaf,
        }
    }

    pub const fn record(name: &'static str, schema: &'static RecordSchema) -> Self {
        Self {
            name,
            shape: Shape::Record(schema),
        }
    }

    pub const fn leaves(name: &'static str, spec: CollectionSpec) -> Self {
        Self {
            name,
            shape: Shape::Leaves(spec),
        }
    }

    pub const fn records(
        name: &'static str,
        schema: &'static RecordSchema,
        spec: CollectionSpec,
    ) -> Self {
        Self {
            name,
            shape: Shape::Records(schema, spec),
        }
    }

    /// Schema of the nested record, for `Record` and `Records` fields.
    pub fn nested(&self) -> Option<&'static RecordSchema> {
        match self.shape {
            Shape::Record(schema) | Shape::Records(schema, _) => Some(schema),
            Shape::Leaf | Shape::Leaves(_) => None,
        }
    }

    pub fn collection(&self) -> Option<&CollectionSpec> {
        match &self.shape {
            Shape::Leaves(spec) | Shape::Records(_, spec) => Some(spec),
            Shape::Leaf | Shape::Record(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct RecordSchema {
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionSpec> {
        self.field(name).and_then(FieldSpec::collection)
    }
}

/// Description of one document kind.
#[derive(Debug)]
pub struct KindSchema {
    /// Metadata type name, which is also the root element name.
    pub name: &'static str,
    pub root: &'static RecordSchema,
    /// File name endings that identify this kind on disk.
    pub suffixes: &'static [&'static str],
    /// Extra canonicalization run before the generic collection sort.
    pub tidy_hook: Option<fn(&mut Element)>,
}

impl KindSchema {
    pub fn matches_path(&self, file_name: &str) -> bool {
        self.suffixes.iter().any(|s| file_name.ends_with(s))
    }

    /// File name with this kind's suffix removed: `Admin.profile-meta.xml`
    /// names the `Admin` profile. Whole-name suffixes like `package.xml`
    /// keep the file name.
    pub fn document_name<'a>(&self, file_name: &'a str) -> &'a str {
        self.suffixes
            .iter()
            .filter_map(|s| file_name.strip_suffix(s))
            .filter(|name| !name.is_empty())
            .min_by_key(|name| name.len())
            .unwrap_or(file_name)
    }
}
