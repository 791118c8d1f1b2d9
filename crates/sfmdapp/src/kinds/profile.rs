//! Profile-only collections: layout assignments and tab visibilities.
//!
//! Everything a profile shares with permission sets is in
//! [`super::permissions`].

use crate::document::Document;
use crate::error::Result;
use crate::leaf::Leaf;
use crate::ops::collection::{Filtered, ZeroMatch};
use crate::ops::filter::{Condition, Filter};
use crate::schema::kinds::PROFILE;
use crate::schema::RecordKey;
use crate::store;
use crate::xml::element::Element;
use std::path::Path;

pub const LAYOUT_ASSIGNMENTS: &str = "layoutAssignments";
pub const TAB_VISIBILITIES: &str = "tabVisibilities";

pub fn open(path: &Path) -> Result<Document> {
    store::open(path, &PROFILE)
}

/// Assigns `layout`, optionally for one record type. The same layout may be
/// assigned for several record types; the exact same assignment twice is
/// rejected.
pub fn add_layout_assignment(doc: &mut Document, layout: &str, record_type: Option<&str>) -> Result<()> {
    let record = Element::record(LAYOUT_ASSIGNMENTS)
        .with_leaf("layout", layout)
        .with_leaf("recordType", Leaf::from_opt(record_type));
    doc.add(LAYOUT_ASSIGNMENTS, record)
}

/// Removes assignments of `layout`; with a record type only that one.
pub fn delete_layout_assignments(doc: &mut Document, layout: &str, record_type: Option<&str>) -> Result<usize> {
    let mut filter = Filter::all().with(Condition::eq("layout", layout));
    if let Some(record_type) = record_type {
        filter.push(Condition::eq("recordType", record_type));
    }
    doc.delete(LAYOUT_ASSIGNMENTS, &filter, ZeroMatch::Error)
}

pub fn list_layout_assignments(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(LAYOUT_ASSIGNMENTS, &Filter::all())
}

pub fn list_tab_visibilities(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(TAB_VISIBILITIES, &Filter::all())
}

pub fn delete_tab_visibility(doc: &mut Document, tab: &str) -> Result<()> {
    doc.delete_key(TAB_VISIBILITIES, &RecordKey::single(tab))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MdError;
    use crate::ops::tidy::tidy;

    #[test]
    fn same_layout_for_different_record_types() {
        let mut doc = Document::new(&PROFILE);
        add_layout_assignment(&mut doc, "Account-Account Layout", None).unwrap();
        add_layout_assignment(&mut doc, "Account-Account Layout", Some("Account.Partner")).unwrap();
        let err = add_layout_assignment(&mut doc, "Account-Account Layout", Some("Account.Partner"))
            .unwrap_err();
        assert!(matches!(err, MdError::AlreadyExists(_)));
        assert_eq!(list_layout_assignments(&doc).count(), 2);
    }

    #[test]
    fn delete_layout_by_record_type() {
        let mut doc = Document::new(&PROFILE);
        add_layout_assignment(&mut doc, "L", None).unwrap();
        add_layout_assignment(&mut doc, "L", Some("Account.Partner")).unwrap();

        assert_eq!(delete_layout_assignments(&mut doc, "L", Some("Account.Partner")).unwrap(), 1);
        assert_eq!(list_layout_assignments(&doc).count(), 1);
        assert_eq!(delete_layout_assignments(&mut doc, "L", None).unwrap(), 1);
        assert!(matches!(
            delete_layout_assignments(&mut doc, "L", None),
            Err(MdError::NotFound(_))
        ));
    }

    #[test]
    fn tidy_puts_untyped_assignment_first() {
        let mut doc = Document::new(&PROFILE);
        add_layout_assignment(&mut doc, "L", Some("Account.Partner")).unwrap();
        add_layout_assignment(&mut doc, "L", None).unwrap();
        tidy(&mut doc, None).unwrap();
        let first = list_layout_assignments(&doc).next().unwrap();
        assert!(first.leaf("recordType").is_absent());
    }

    #[test]
    fn tab_visibilities() {
        let mut doc = Document::new(&PROFILE);
        doc.root_mut().push(
            Element::record(TAB_VISIBILITIES)
                .with_leaf("tab", "standard-Account")
                .with_leaf("visibility", "DefaultOn"),
        );
        assert_eq!(list_tab_visibilities(&doc).count(), 1);
        delete_tab_visibility(&mut doc, "standard-Account").unwrap();
        assert!(delete_tab_visibility(&mut doc, "standard-Account").is_err());
    }
}
