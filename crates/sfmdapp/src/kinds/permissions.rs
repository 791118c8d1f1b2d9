//! # Permission Collections
//!
//! Profiles and permission sets share most of their collections, so the
//! operations live here once and work on any [`Document`] whose kind declares
//! the collection. Each operation is a few lines over the generic engine:
//! build a record, a key, a [`Patch`] or a [`Filter`], then call the matching
//! [`Document`] method.
//!
//! Flag options arrive as structs of `Option<bool>` ([`ObjectPermissionFlags`],
//! [`FieldPermissionFlags`], [`ApplicationVisibilityFlags`]). `None` means the
//! caller did not mention the flag: the patch built from it leaves the field
//! alone and the filter built from it does not constrain it.

use crate::document::Document;
use crate::error::{MdError, Result};
use crate::ops::collection::{Filtered, ZeroMatch};
use crate::ops::filter::{Condition, Filter};
use crate::ops::patch::Patch;
use crate::schema::RecordKey;
use crate::xml::element::Element;

pub const OBJECT_PERMISSIONS: &str = "objectPermissions";
pub const FIELD_PERMISSIONS: &str = "fieldPermissions";
pub const APPLICATION_VISIBILITIES: &str = "applicationVisibilities";
pub const CLASS_ACCESSES: &str = "classAccesses";
pub const FLOW_ACCESSES: &str = "flowAccesses";
pub const USER_PERMISSIONS: &str = "userPermissions";

const OBJECT_FLAG_FIELDS: [&str; 6] = [
    "allowCreate",
    "allowDelete",
    "allowEdit",
    "allowRead",
    "modifyAllRecords",
    "viewAllRecords",
];

/// The six object permission flags. `None` leaves a flag untouched when
/// patching and unconstrained when filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectPermissionFlags {
    pub create: Option<bool>,
    pub delete: Option<bool>,
    pub edit: Option<bool>,
    pub read: Option<bool>,
    pub modify_all: Option<bool>,
    pub view_all: Option<bool>,
}

impl ObjectPermissionFlags {
    fn pairs(&self) -> [(&'static str, Option<bool>); 6] {
        [
            ("allowCreate", self.create),
            ("allowDelete", self.delete),
            ("allowEdit", self.edit),
            ("allowRead", self.read),
            ("modifyAllRecords", self.modify_all),
            ("viewAllRecords", self.view_all),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().iter().all(|(_, v)| v.is_none())
    }

    pub fn patch(&self) -> Patch {
        self.pairs()
            .into_iter()
            .fold(Patch::new(), |patch, (field, value)| patch.set_opt_bool(field, value))
    }

    /// Filter on the flags that are set. A record without the flag counts as
    /// `false`.
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::all();
        for (field, value) in self.pairs() {
            if let Some(value) = value {
                filter.push(Condition::flag_or_absent(field, value));
            }
        }
        filter
    }
}

/// Compact access summary: `c`reate, `r`ead (`R` with view all), `u`pdate
/// (`U` with modify all), `d`elete.
pub fn object_access_code(record: &Element) -> String {
    let flag = |field: &str| record.leaf(field).to_bool();
    let mut code = String::new();
    if flag("allowCreate") {
        code.push('c');
    }
    if flag("viewAllRecords") {
        code.push('R');
    } else if flag("allowRead") {
        code.push('r');
    }
    if flag("modifyAllRecords") {
        code.push('U');
    } else if flag("allowEdit") {
        code.push('u');
    }
    if flag("allowDelete") {
        code.push('d');
    }
    code
}

pub fn add_object_permissions(doc: &mut Document, object: &str) -> Result<()> {
    let record = OBJECT_FLAG_FIELDS
        .iter()
        .fold(Element::record(OBJECT_PERMISSIONS), |rec, field| rec.with_leaf(field, false))
        .with_leaf("object", object);
    doc.add(OBJECT_PERMISSIONS, record)
}

pub fn update_object_permissions(doc: &mut Document, object: &str, flags: &ObjectPermissionFlags) -> Result<()> {
    doc.update(OBJECT_PERMISSIONS, &RecordKey::single(object), &flags.patch())
}

/// Removes the object's permissions along with the field permissions of its
/// fields. Returns the number of records removed.
pub fn delete_object_permissions(doc: &mut Document, object: &str) -> Result<usize> {
    let prefix = format!("{object}.");
    let fields: Vec<String> = doc
        .filter(FIELD_PERMISSIONS, &Filter::all())
        .map(|r| r.leaf("field").display_text().to_string())
        .filter(|f| f.starts_with(&prefix))
        .collect();
    let mut removed = 0;
    for field in fields {
        removed += doc.delete(
            FIELD_PERMISSIONS,
            &Filter::all().with(Condition::eq("field", field)),
            ZeroMatch::Allow,
        )?;
    }
    removed += doc.delete(
        OBJECT_PERMISSIONS,
        &Filter::all().with(Condition::eq("object", object)),
        ZeroMatch::Allow,
    )?;
    if removed == 0 {
        return Err(MdError::not_found(object));
    }
    Ok(removed)
}

/// Case-insensitive lookup by object name.
pub fn show_object_permissions<'a>(doc: &'a Document, object: &str) -> Result<&'a Element> {
    let filter = Filter::all().with(Condition::eq_ignore_case("object", object));
    doc.filter(OBJECT_PERMISSIONS, &filter)
        .next()
        .ok_or_else(|| MdError::not_found(object))
}

pub fn list_object_permissions<'a>(
    doc: &'a Document,
    flags: &ObjectPermissionFlags,
) -> Filtered<'a, Element, Condition> {
    doc.filter(OBJECT_PERMISSIONS, &flags.filter())
}

// Field permissions

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldPermissionFlags {
    pub readable: Option<bool>,
    pub editable: Option<bool>,
}

impl FieldPermissionFlags {
    pub fn patch(&self) -> Patch {
        Patch::new()
            .set_opt_bool("editable", self.editable)
            .set_opt_bool("readable", self.readable)
    }

    pub fn filter(&self) -> Filter {
        let mut filter = Filter::all();
        if let Some(v) = self.editable {
            filter.push(Condition::flag_or_absent("editable", v));
        }
        if let Some(v) = self.readable {
            filter.push(Condition::flag_or_absent("readable", v));
        }
        filter
    }
}

pub fn update_field_permissions(doc: &mut Document, field: &str, flags: &FieldPermissionFlags) -> Result<()> {
    doc.update(FIELD_PERMISSIONS, &RecordKey::single(field), &flags.patch())
}

/// Copies the permissions of `src` onto a new `dest` field.
pub fn clone_field_permissions(doc: &mut Document, src: &str, dest: &str) -> Result<()> {
    doc.clone_record(FIELD_PERMISSIONS, &RecordKey::single(src), &RecordKey::single(dest))
}

pub fn delete_field_permissions(doc: &mut Document, field: &str) -> Result<()> {
    doc.delete_key(FIELD_PERMISSIONS, &RecordKey::single(field))
}

pub fn list_field_permissions<'a>(
    doc: &'a Document,
    flags: &FieldPermissionFlags,
) -> Filtered<'a, Element, Condition> {
    doc.filter(FIELD_PERMISSIONS, &flags.filter())
}

// Application visibility

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationVisibilityFlags {
    pub default: Option<bool>,
    pub visible: Option<bool>,
}

impl ApplicationVisibilityFlags {
    pub fn patch(&self) -> Patch {
        Patch::new()
            .set_opt_bool("default", self.default)
            .set_opt_bool("visible", self.visible)
    }
}

pub fn add_application_visibility(doc: &mut Document, application: &str) -> Result<()> {
    let record = Element::record(APPLICATION_VISIBILITIES)
        .with_leaf("application", application)
        .with_leaf("default", false)
        .with_leaf("visible", true);
    doc.add(APPLICATION_VISIBILITIES, record)
}

pub fn update_application_visibility(
    doc: &mut Document,
    application: &str,
    flags: &ApplicationVisibilityFlags,
) -> Result<()> {
    doc.update(APPLICATION_VISIBILITIES, &RecordKey::single(application), &flags.patch())
}

pub fn delete_application_visibility(doc: &mut Document, application: &str) -> Result<()> {
    doc.delete_key(APPLICATION_VISIBILITIES, &RecordKey::single(application))
}

/// All application visibilities, or only visible ones.
pub fn list_applications(doc: &Document, visible_only: bool) -> Filtered<'_, Element, Condition> {
    let mut filter = Filter::all();
    if visible_only {
        filter.push(Condition::flag("visible", true));
    }
    doc.filter(APPLICATION_VISIBILITIES, &filter)
}

pub fn show_application<'a>(doc: &'a Document, application: &str) -> Result<&'a Element> {
    let filter = Filter::all().with(Condition::eq_ignore_case("application", application));
    doc.filter(APPLICATION_VISIBILITIES, &filter)
        .next()
        .ok_or_else(|| MdError::not_found(application))
}

// Apex class access

pub fn add_class_access(doc: &mut Document, class: &str) -> Result<()> {
    let record = Element::record(CLASS_ACCESSES)
        .with_leaf("apexClass", class)
        .with_leaf("enabled", true);
    doc.add(CLASS_ACCESSES, record)
}

pub fn delete_class_access(doc: &mut Document, class: &str) -> Result<()> {
    doc.delete_key(CLASS_ACCESSES, &RecordKey::single(class))
}

pub fn list_class_accesses(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(CLASS_ACCESSES, &Filter::all())
}

// Flow access

pub fn list_flow_accesses(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(FLOW_ACCESSES, &Filter::all())
}

pub fn delete_flow_access(doc: &mut Document, flow: &str) -> Result<()> {
    doc.delete_key(FLOW_ACCESSES, &RecordKey::single(flow))
}

// User permissions

pub fn add_user_permission(doc: &mut Document, name: &str) -> Result<()> {
    let record = Element::record(USER_PERMISSIONS)
        .with_leaf("enabled", true)
        .with_leaf("name", name);
    doc.add(USER_PERMISSIONS, record)
}

pub fn delete_user_permission(doc: &mut Document, name: &str) -> Result<()> {
    doc.delete_key(USER_PERMISSIONS, &RecordKey::single(name))
}

pub fn list_user_permissions(doc: &Document) -> Filtered<'_, Element, Condition> {
    doc.filter(USER_PERMISSIONS, &Filter::all())
}

/// `name: true|false` style summary of an `enabled` flag.
pub fn enabled_text(record: &Element) -> &'static str {
    if record.leaf("enabled").to_bool() {
        "enabled"
    } else {
        "disabled"
    }
}

/// Name of a record by its key field, used for list output.
pub fn record_name<'a>(record: &'a Element, field: &str) -> &'a str {
    record
        .child(field)
        .map(Element::text_content)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::Leaf;
    use crate::schema::kinds::{PERMISSION_SET, PROFILE};
    use crate::test_utils::profile_with_account;

    #[test]
    fn update_keeps_untouched_flags() {
        let mut doc = profile_with_account();
        let flags = ObjectPermissionFlags {
            edit: Some(true),
            ..Default::default()
        };
        update_object_permissions(&mut doc, "Account", &flags).unwrap();
        let rec = show_object_permissions(&doc, "Account").unwrap();
        assert_eq!(rec.leaf("allowRead"), Leaf::text("true"));
        assert_eq!(rec.leaf("allowEdit"), Leaf::text("true"));
        assert_eq!(rec.leaf("allowCreate"), Leaf::text("false"));
    }

    #[test]
    fn update_missing_object_is_not_found() {
        let mut doc = profile_with_account();
        let before = doc.clone();
        let flags = ObjectPermissionFlags {
            edit: Some(true),
            ..Default::default()
        };
        let err = update_object_permissions(&mut doc, "Contact", &flags).unwrap_err();
        assert!(matches!(err, MdError::NotFound(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn explicit_false_is_written() {
        let mut doc = profile_with_account();
        let flags = ObjectPermissionFlags {
            read: Some(false),
            ..Default::default()
        };
        update_object_permissions(&mut doc, "Account", &flags).unwrap();
        let rec = show_object_permissions(&doc, "account").unwrap();
        assert_eq!(rec.leaf("allowRead"), Leaf::text("false"));
    }

    #[test]
    fn add_object_permissions_starts_all_false() {
        let mut doc = Document::new(&PERMISSION_SET);
        add_object_permissions(&mut doc, "Lead").unwrap();
        let rec = show_object_permissions(&doc, "Lead").unwrap();
        for field in OBJECT_FLAG_FIELDS {
            assert_eq!(rec.leaf(field), Leaf::text("false"), "{field}");
        }
        assert_eq!(object_access_code(rec), "");
        assert!(matches!(
            add_object_permissions(&mut doc, "Lead"),
            Err(MdError::AlreadyExists(_))
        ));
    }

    #[test]
    fn delete_object_removes_its_field_permissions() {
        let mut doc = profile_with_account();
        doc.add(
            FIELD_PERMISSIONS,
            Element::record(FIELD_PERMISSIONS)
                .with_leaf("editable", false)
                .with_leaf("field", "Account.Name")
                .with_leaf("readable", true),
        )
        .unwrap();
        doc.add(
            FIELD_PERMISSIONS,
            Element::record(FIELD_PERMISSIONS)
                .with_leaf("editable", false)
                .with_leaf("field", "AccountContactRelation.Roles")
                .with_leaf("readable", true),
        )
        .unwrap();

        let removed = delete_object_permissions(&mut doc, "Account").unwrap();
        assert_eq!(removed, 2);
        let left: Vec<_> = list_field_permissions(&doc, &FieldPermissionFlags::default())
            .map(|r| record_name(r, "field").to_string())
            .collect();
        assert_eq!(left, vec!["AccountContactRelation.Roles"]);
        assert!(matches!(
            delete_object_permissions(&mut doc, "Account"),
            Err(MdError::NotFound(_))
        ));
    }

    #[test]
    fn list_filter_treats_absent_as_false() {
        let mut doc = profile_with_account();
        doc.add(
            OBJECT_PERMISSIONS,
            Element::record(OBJECT_PERMISSIONS).with_leaf("object", "Bare"),
        )
        .unwrap();
        let no_delete = ObjectPermissionFlags {
            delete: Some(false),
            ..Default::default()
        };
        let names: Vec<_> = list_object_permissions(&doc, &no_delete)
            .map(|r| record_name(r, "object"))
            .collect();
        assert_eq!(names, vec!["Account", "Bare"]);
    }

    #[test]
    fn access_code_summarises_flags() {
        let doc = profile_with_account();
        let rec = show_object_permissions(&doc, "Account").unwrap();
        assert_eq!(object_access_code(rec), "r");
    }

    #[test]
    fn adding_application_twice_leaves_one_entry() {
        let mut doc = Document::new(&PROFILE);
        add_application_visibility(&mut doc, "MyApp").unwrap();
        let err = add_application_visibility(&mut doc, "MyApp").unwrap_err();
        assert!(matches!(err, MdError::AlreadyExists(_)));
        assert_eq!(list_applications(&doc, false).count(), 1);
        let rec = show_application(&doc, "myapp").unwrap();
        assert_eq!(rec.leaf("default"), Leaf::text("false"));
        assert_eq!(rec.leaf("visible"), Leaf::text("true"));
    }

    #[test]
    fn application_visibility_update_and_visible_filter() {
        let mut doc = Document::new(&PERMISSION_SET);
        add_application_visibility(&mut doc, "A").unwrap();
        add_application_visibility(&mut doc, "B").unwrap();
        let hide = ApplicationVisibilityFlags {
            visible: Some(false),
            ..Default::default()
        };
        update_application_visibility(&mut doc, "B", &hide).unwrap();
        let visible: Vec<_> = list_applications(&doc, true)
            .map(|r| record_name(r, "application"))
            .collect();
        assert_eq!(visible, vec!["A"]);
        delete_application_visibility(&mut doc, "A").unwrap();
        assert!(matches!(
            delete_application_visibility(&mut doc, "A"),
            Err(MdError::NotFound(_))
        ));
    }

    #[test]
    fn field_permissions_clone_and_update() {
        let mut doc = Document::new(&PROFILE);
        doc.add(
            FIELD_PERMISSIONS,
            Element::record(FIELD_PERMISSIONS)
                .with_leaf("editable", true)
                .with_leaf("field", "Lead.Status")
                .with_leaf("readable", true),
        )
        .unwrap();
        clone_field_permissions(&mut doc, "Lead.Status", "Account.Status").unwrap();
        let fields: Vec<_> = list_field_permissions(&doc, &FieldPermissionFlags::default())
            .map(|r| record_name(r, "field"))
            .collect();
        assert_eq!(fields, vec!["Account.Status", "Lead.Status"]);

        let read_only = FieldPermissionFlags {
            editable: Some(false),
            ..Default::default()
        };
        update_field_permissions(&mut doc, "Account.Status", &read_only).unwrap();
        let editable: Vec<_> = list_field_permissions(
            &doc,
            &FieldPermissionFlags {
                editable: Some(true),
                ..Default::default()
            },
        )
        .map(|r| record_name(r, "field"))
        .collect();
        assert_eq!(editable, vec!["Lead.Status"]);

        assert!(matches!(
            clone_field_permissions(&mut doc, "Nope.Nope", "X.Y"),
            Err(MdError::NotFound(_))
        ));
        delete_field_permissions(&mut doc, "Lead.Status").unwrap();
    }

    #[test]
    fn class_flow_and_user_permissions() {
        let mut doc = Document::new(&PROFILE);
        add_class_access(&mut doc, "MyController").unwrap();
        add_user_permission(&mut doc, "ApiEnabled").unwrap();
        doc.add(
            FLOW_ACCESSES,
            Element::record(FLOW_ACCESSES)
                .with_leaf("enabled", true)
                .with_leaf("flow", "Onboarding"),
        )
        .unwrap();

        assert_eq!(list_class_accesses(&doc).count(), 1);
        assert_eq!(enabled_text(list_user_permissions(&doc).next().unwrap()), "enabled");
        assert_eq!(list_flow_accesses(&doc).count(), 1);

        delete_class_access(&mut doc, "MyController").unwrap();
        delete_user_permission(&mut doc, "ApiEnabled").unwrap();
        delete_flow_access(&mut doc, "Onboarding").unwrap();
        assert!(matches!(
            delete_flow_access(&mut doc, "Onboarding"),
            Err(MdError::NotFound(_))
        ));
    }
}
