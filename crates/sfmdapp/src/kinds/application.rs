//! Custom applications: profile action overrides.
//!
//! Overrides are selected with an [`ActionOverrideQuery`], which turns into a
//! [`Filter`] once and is then shared by list, delete and reset.

use crate::document::Document;
use crate::error::{MdError, Result};
use crate::leaf::Leaf;
use crate::ops::collection::{Filtered, ZeroMatch};
use crate::ops::filter::{Condition, Filter};
use crate::schema::kinds::CUSTOM_APPLICATION;
use crate::store;
use crate::xml::element::Element;
use std::fmt;
use std::path::Path;

pub const PROFILE_ACTION_OVERRIDES: &str = "profileActionOverrides";

pub fn open(path: &Path) -> Result<Document> {
    store::open(path, &CUSTOM_APPLICATION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideAction {
    Tab,
    View,
}

impl OverrideAction {
    pub fn as_str(self) -> &'static str {
        match self {
            OverrideAction::Tab => "Tab",
            OverrideAction::View => "View",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFactor {
    Large,
    Small,
}

impl FormFactor {
    pub fn as_str(self) -> &'static str {
        match self {
            FormFactor::Large => "Large",
            FormFactor::Small => "Small",
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection of profile action overrides. Unset fields match anything.
///
/// Action and form factor compare exactly; the free-text fields compare
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOverrideQuery {
    pub action: Option<OverrideAction>,
    pub form_factor: Option<FormFactor>,
    pub profile: Option<String>,
    /// Page or sObject type.
    pub object: Option<String>,
    /// A bare record type name is qualified with `object` when one is given.
    pub record_type: Option<String>,
    pub content: Option<String>,
}

impl ActionOverrideQuery {
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::all();
        if let Some(action) = self.action {
            filter.push(Condition::eq("actionName", action.as_str()));
        }
        if let Some(form_factor) = self.form_factor {
            filter.push(Condition::eq("formFactor", form_factor.as_str()));
        }
        if let Some(profile) = non_empty(&self.profile) {
            filter.push(Condition::eq_ignore_case("profile", profile));
        }
        if let Some(object) = non_empty(&self.object) {
            filter.push(Condition::eq_ignore_case("pageOrSobjectType", object));
        }
        if let Some(record_type) = self.qualified_record_type() {
            filter.push(Condition::eq_ignore_case("recordType", record_type));
        }
        if let Some(content) = non_empty(&self.content) {
            filter.push(Condition::eq_ignore_case("content", content));
        }
        filter
    }

    fn qualified_record_type(&self) -> Option<String> {
        let record_type = non_empty(&self.record_type)?;
        match non_empty(&self.object) {
            Some(object) if !record_type.contains('.') => Some(format!("{object}.{record_type}")),
            _ => Some(record_type.to_string()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn list_action_overrides<'a>(
    doc: &'a Document,
    query: &ActionOverrideQuery,
) -> Filtered<'a, Element, Condition> {
    doc.filter(PROFILE_ACTION_OVERRIDES, &query.filter())
}

pub fn delete_action_overrides(doc: &mut Document, query: &ActionOverrideQuery) -> Result<usize> {
    doc.delete(PROFILE_ACTION_OVERRIDES, &query.filter(), ZeroMatch::Error)
}

/// Puts matching overrides back to the platform default: the Lightning page
/// goes away and the type becomes `Default`. The records themselves stay.
pub fn reset_action_overrides(doc: &mut Document, query: &ActionOverrideQuery) -> Result<usize> {
    let reset = doc.reset(PROFILE_ACTION_OVERRIDES, &query.filter(), |o| {
        o.set_leaf("content", &Leaf::Absent);
        o.set_leaf("type", &Leaf::text("Default"));
    });
    if reset == 0 {
        return Err(MdError::not_found("profile action overrides matching filter"));
    }
    Ok(reset)
}
