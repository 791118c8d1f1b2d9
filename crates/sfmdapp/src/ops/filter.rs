//! Record filtering.
//!
//! A [`Filter`] is a value: an AND of [`Condition`]s built once per invocation
//! and then shared by list, show, delete and reset. Nothing here looks at
//! command-line state.

use crate::leaf::Leaf;
use crate::schema::{CollectionSpec, RecordKey};
use crate::xml::element::Element;

/// Something that can accept or reject a record.
pub trait Predicate<R: ?Sized> {
    fn matches(&self, record: &R) -> bool;
}

impl<R: ?Sized, F> Predicate<R> for F
where
    F: Fn(&R) -> bool,
{
    fn matches(&self, record: &R) -> bool {
        self(record)
    }
}

/// A single condition on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Element name equals the given name.
    Tag(String),
    /// Natural key, as computed by the collection spec, equals `key`.
    Key { spec: CollectionSpec, key: RecordKey },
    /// A leaf field has the given text.
    FieldEq {
        field: String,
        value: String,
        ignore_case: bool,
    },
    /// A boolean leaf holds `value`.
    ///
    /// With `absent_is_false` a missing leaf counts as `false`; otherwise
    /// a missing leaf never matches.
    Flag {
        field: String,
        value: bool,
        absent_is_false: bool,
    },
    /// The leaf field exists (possibly empty).
    Present(String),
}

impl Condition {
    pub fn key(spec: CollectionSpec, key: RecordKey) -> Self {
        Condition::Key { spec, key }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::FieldEq {
            field: field.into(),
            value: value.into(),
            ignore_case: false,
        }
    }

    pub fn eq_ignore_case(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::FieldEq {
            field: field.into(),
            value: value.into(),
            ignore_case: true,
        }
    }

    pub fn flag(field: impl Into<String>, value: bool) -> Self {
        Condition::Flag {
            field: field.into(),
            value,
            absent_is_false: false,
        }
    }

    pub fn flag_or_absent(field: impl Into<String>, value: bool) -> Self {
        Condition::Flag {
            field: field.into(),
            value,
            absent_is_false: true,
        }
    }

    pub fn present(field: impl Into<String>) -> Self {
        Condition::Present(field.into())
    }
}

impl Predicate<Element> for Condition {
    fn matches(&self, record: &Element) -> bool {
        match self {
            Condition::Tag(name) => record.name == *name,
            Condition::Key { spec, key } => spec.key_of(record) == *key,
            Condition::FieldEq {
                field,
                value,
                ignore_case,
            } => match record.leaf(field) {
                Leaf::Absent => false,
                Leaf::Present(text) if *ignore_case => text.to_lowercase() == value.to_lowercase(),
                Leaf::Present(text) => text == *value,
            },
            Condition::Flag {
                field,
                value,
                absent_is_false,
            } => match record.leaf(field) {
                Leaf::Absent => *absent_is_false && !*value,
                present => present.to_bool() == *value,
            },
            Condition::Present(field) => record.leaf(field).is_present(),
        }
    }
}

/// An AND of conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn into_conditions(self) -> Vec<Condition> {
        self.conditions
    }
}

impl Predicate<Element> for Filter {
    fn matches(&self, record: &Element) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }
}
