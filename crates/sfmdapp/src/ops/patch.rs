//! Shallow record patches.
//!
//! A patch is an ordered list of `(field, Leaf)` pairs. Applying it overwrites
//! each field whose patch value is `Present` (an explicit `false` or `""`
//! included) and leaves every other field as it was. `Absent` entries are
//! no-ops, so a patch can never clear a field by omission.

use crate::leaf::Leaf;
use crate::xml::element::Element;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    entries: Vec<(String, Leaf)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Leaf>) -> Self {
        self.push(field, value.into());
        self
    }

    pub fn set_opt_bool(mut self, field: impl Into<String>, value: Option<bool>) -> Self {
        self.push(field, Leaf::from_opt_bool(value));
        self
    }

    pub fn set_opt(mut self, field: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.push(field, Leaf::from_opt(value));
        self
    }

    pub fn push(&mut self, field: impl Into<String>, value: Leaf) {
        self.entries.push((field.into(), value));
    }

    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_absent())
    }

    pub fn entries(&self) -> &[(String, Leaf)] {
        &self.entries
    }

    pub fn apply(&self, record: &mut Element) {
        for (field, value) in &self.entries {
            if value.is_present() {
                record.set_leaf(field, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Element {
        Element::record("objectPermissions")
            .with_leaf("allowEdit", false)
            .with_leaf("allowRead", true)
            .with_leaf("object", "Account")
    }

    #[test]
    fn present_values_overwrite() {
        let mut rec = account();
        Patch::new().set("allowEdit", true).apply(&mut rec);
        assert_eq!(rec.leaf("allowEdit"), Leaf::text("true"));
        assert_eq!(rec.leaf("allowRead"), Leaf::text("true"));
    }

    #[test]
    fn explicit_false_is_applied() {
        let mut rec = account();
        Patch::new().set("allowRead", false).apply(&mut rec);
        assert_eq!(rec.leaf("allowRead"), Leaf::text("false"));
    }

    #[test]
    fn absent_values_never_clear() {
        let mut rec = account();
        let before = rec.clone();
        Patch::new()
            .set_opt_bool("allowRead", None)
            .set_opt_bool("allowEdit", None)
            .apply(&mut rec);
        assert_eq!(rec, before);
    }

    #[test]
    fn patch_adds_missing_fields() {
        let mut rec = account();
        Patch::new().set("viewAllRecords", false).apply(&mut rec);
        assert_eq!(rec.leaf("viewAllRecords"), Leaf::text("false"));
    }

    #[test]
    fn explicit_empty_text_is_applied() {
        let mut rec = Element::record("fields").with_leaf("label", "Old");
        Patch::new().set("label", "").apply(&mut rec);
        assert_eq!(rec.leaf("label"), Leaf::text(""));
    }

    #[test]
    fn is_empty_ignores_absent_entries() {
        assert!(Patch::new().set_opt_bool("allowRead", None).is_empty());
        assert!(!Patch::new().set("allowRead", false).is_empty());
    }
}
