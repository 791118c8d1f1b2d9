//! Owned element tree.
//!
//! Metadata documents never use mixed content, so an element either holds text
//! (a leaf) or child elements (a record). An empty element decodes as empty
//! text; the encoder writes both empty shapes the same way.

use crate::leaf::Leaf;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Children(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    pub body: Body,
}

impl Element {
    /// An element that holds child elements.
    pub fn record(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            body: Body::Children(Vec::new()),
        }
    }

    /// An element that holds text.
    pub fn text_leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            body: Body::Text(text.into()),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`Element::set_leaf`].
    pub fn with_leaf(mut self, name: &str, value: impl Into<Leaf>) -> Self {
        self.set_leaf(name, &value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            Body::Children(_) => None,
        }
    }

    /// Leaf text of this element; an element with no content reads as `""`.
    pub fn text_content(&self) -> &str {
        match &self.body {
            Body::Text(text) => text,
            Body::Children(_) => "",
        }
    }

    /// Whether the body holds child elements rather than text.
    pub fn is_record(&self) -> bool {
        matches!(self.body, Body::Children(_))
    }

    pub fn children(&self) -> &[Element] {
        match &self.body {
            Body::Children(children) => children,
            Body::Text(_) => &[],
        }
    }

    /// Mutable children; a text body is turned into an empty record first.
    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        if let Body::Text(_) = self.body {
            self.body = Body::Children(Vec::new());
        }
        match &mut self.body {
            Body::Children(children) => children,
            Body::Text(_) => unreachable!("text body replaced above"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.body {
            Body::Text(text) => text.is_empty(),
            Body::Children(children) => children.is_empty(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children_mut().iter_mut().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + Clone + 'a {
        self.children().iter().filter(move |c| c.name == name)
    }

    pub fn push(&mut self, child: Element) {
        self.children_mut().push(child);
    }

    /// Reads a scalar field of this record.
    pub fn leaf(&self, name: &str) -> Leaf {
        match self.child(name) {
            Some(child) => Leaf::Present(child.text_content().to_string()),
            None => Leaf::Absent,
        }
    }

    /// Writes a scalar field. `Absent` removes the element, `Present` replaces
    /// the text of the first element with that name or appends a new one.
    pub fn set_leaf(&mut self, name: &str, value: &Leaf) {
        match value {
            Leaf::Absent => self.children_mut().retain(|c| c.name != name),
            Leaf::Present(text) => match self.child_mut(name) {
                Some(child) => child.body = Body::Text(text.clone()),
                None => self.push(Element::text_leaf(name, text.clone())),
            },
        }
    }

    /// Runs `f` over the children named `name` as one contiguous vector.
    ///
    /// The items go back where the first of them was found, or at the end when
    /// the collection was empty. Encoding sorts by schema anyway, so the
    /// position only keeps the in-memory tree tidy.
    pub fn with_collection<T>(&mut self, name: &str, f: impl FnOnce(&mut Vec<Element>) -> T) -> T {
        let children = self.children_mut();
        let anchor = children.iter().position(|c| c.name == name);
        let mut items = Vec::new();
        let mut rest = Vec::with_capacity(children.len());
        for child in children.drain(..) {
            if child.name == name {
                items.push(child);
            } else {
                rest.push(child);
            }
        }

        let out = f(&mut items);

        let at = anchor.unwrap_or(rest.len()).min(rest.len());
        rest.splice(at..at, items);
        *children = rest;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission(object: &str) -> Element {
        Element::record("objectPermissions")
            .with_leaf("allowRead", true)
            .with_leaf("object", object)
    }

    #[test]
    fn leaf_reads_absent_and_empty_differently() {
        let rec = Element::record("r").with_child(Element::text_leaf("label", ""));
        assert_eq!(rec.leaf("label"), Leaf::text(""));
        assert_eq!(rec.leaf("description"), Leaf::Absent);
    }

    #[test]
    fn set_leaf_absent_removes_element() {
        let mut rec = permission("Account");
        rec.set_leaf("allowRead", &Leaf::Absent);
        assert!(rec.child("allowRead").is_none());
        assert_eq!(rec.children().len(), 1);
    }

    #[test]
    fn set_leaf_replaces_in_place() {
        let mut rec = permission("Account");
        rec.set_leaf("allowRead", &Leaf::from_bool(false));
        assert_eq!(rec.children()[0].name, "allowRead");
        assert_eq!(rec.leaf("allowRead"), Leaf::text("false"));
    }

    #[test]
    fn with_collection_keeps_other_children_in_place() {
        let mut root = Element::record("Profile")
            .with_leaf("custom", true)
            .with_child(permission("Account"))
            .with_child(permission("Contact"))
            .with_leaf("userLicense", "Salesforce");

        let count = root.with_collection("objectPermissions", |items| {
            items.retain(|i| i.leaf("object") != Leaf::text("Account"));
            items.len()
        });

        assert_eq!(count, 1);
        let names: Vec<_> = root.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["custom", "objectPermissions", "userLicense"]);
    }

    #[test]
    fn with_collection_appends_when_empty() {
        let mut root = Element::record("Profile").with_leaf("custom", true);
        root.with_collection("objectPermissions", |items| items.push(permission("Lead")));
        assert_eq!(root.children().last().map(|c| c.name.as_str()), Some("objectPermissions"));
    }

    #[test]
    fn children_mut_turns_empty_text_into_record() {
        let mut el = Element::text_leaf("loginHours", "");
        el.push(Element::text_leaf("mondayStart", "0"));
        assert_eq!(el.children().len(), 1);
    }
}
