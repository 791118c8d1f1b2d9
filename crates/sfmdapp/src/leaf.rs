//! # Optional Leaves
//!
//! Every scalar field of a metadata document is a text element that may be
//! missing altogether. The three observable states matter:
//!
//! | State | On disk | `Leaf` |
//! |-------|---------|--------|
//! | absent | element omitted | `Leaf::Absent` |
//! | present, empty | `<x></x>` | `Leaf::Present("")` |
//! | present | `<x>text</x>` | `Leaf::Present("text")` |
//!
//! An absent leaf is never rewritten as an empty one (and vice versa) unless an
//! edit explicitly targets that field.
//!
//! `Leaf` orders `Absent` before any present value, which is what canonical
//! sorting relies on for keys with optional parts (layout assignments without a
//! record type sort first).

use crate::boolean;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Leaf {
    #[default]
    Absent,
    Present(String),
}

impl Leaf {
    pub fn text(value: impl Into<String>) -> Self {
        Leaf::Present(value.into())
    }

    pub fn from_bool(value: bool) -> Self {
        Leaf::Present(boolean::encode(value).to_string())
    }

    /// `Some(b)` becomes a present boolean leaf, `None` stays absent.
    pub fn from_opt_bool(value: Option<bool>) -> Self {
        value.map(Leaf::from_bool).unwrap_or_default()
    }

    pub fn from_opt(value: Option<impl Into<String>>) -> Self {
        value.map(|v| Leaf::Present(v.into())).unwrap_or_default()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Leaf::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Leaf::Absent => None,
            Leaf::Present(text) => Some(text),
        }
    }

    /// Present `"true"` is true; every other state, absent included, is false.
    pub fn to_bool(&self) -> bool {
        self.as_str().and_then(boolean::decode).unwrap_or(false)
    }

    /// The boolean value if the leaf holds canonical boolean text.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_str().and_then(boolean::decode)
    }

    /// Text for display: absent renders as the empty string.
    pub fn display_text(&self) -> &str {
        self.as_str().unwrap_or("")
    }
}

impl From<&str> for Leaf {
    fn from(value: &str) -> Self {
        Leaf::Present(value.to_string())
    }
}

impl From<String> for Leaf {
    fn from(value: String) -> Self {
        Leaf::Present(value)
    }
}

impl From<bool> for Leaf {
    fn from(value: bool) -> Self {
        Leaf::from_bool(value)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_states_are_distinct() {
        assert_ne!(Leaf::Absent, Leaf::text(""));
        assert_ne!(Leaf::text(""), Leaf::text("x"));
        assert!(Leaf::Absent.is_absent());
        assert!(Leaf::text("").is_present());
    }

    #[test]
    fn to_bool_only_accepts_true_text() {
        assert!(Leaf::text("true").to_bool());
        assert!(!Leaf::text("false").to_bool());
        assert!(!Leaf::text("").to_bool());
        assert!(!Leaf::text("TRUE").to_bool());
        assert!(!Leaf::Absent.to_bool());
    }

    #[test]
    fn from_bool_is_present_canonical_text() {
        assert_eq!(Leaf::from_bool(true), Leaf::text("true"));
        assert_eq!(Leaf::from_bool(false), Leaf::text("false"));
        assert_eq!(Leaf::from_opt_bool(None), Leaf::Absent);
    }

    #[test]
    fn absent_sorts_first() {
        let mut leaves = vec![Leaf::text("b"), Leaf::Absent, Leaf::text("")];
        leaves.sort();
        assert_eq!(leaves, vec![Leaf::Absent, Leaf::text(""), Leaf::text("b")]);
    }
}
