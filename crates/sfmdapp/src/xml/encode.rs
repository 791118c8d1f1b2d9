//! Canonical writer.
//!
//! Output is a pure function of the element tree and its schema: children are
//! written in schema field order no matter how they were read or edited.
//! Elements the schema does not know stay right after the known sibling that
//! preceded them when the file was read (or at the front if none did).

use super::element::{Body, Element};
use crate::schema::RecordSchema;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const INDENT: &str = "    ";

/// Encodes a whole document: declaration line, root element, trailing newline.
pub fn encode_document(root: &Element, schema: Option<&RecordSchema>) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    write_element(&mut out, root, schema, 0);
    out.push('\n');
    out
}

/// Encodes a single element without declaration, as used by `show` output.
pub fn encode_fragment(element: &Element, schema: Option<&RecordSchema>) -> String {
    let mut out = String::new();
    write_element(&mut out, element, schema, 0);
    out
}

fn write_element(out: &mut String, el: &Element, schema: Option<&RecordSchema>, depth: usize) {
    push_indent(out, depth);
    out.push('<');
    out.push_str(&el.name);
    for (name, value) in ordered_attrs(&el.attrs) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(out, value);
        out.push('"');
    }
    out.push('>');

    match &el.body {
        Body::Text(text) => escape_into(out, text),
        Body::Children(children) if children.is_empty() => {}
        Body::Children(children) => {
            for (child, child_schema) in ordered_children(children, schema) {
                out.push('\n');
                write_element(out, child, child_schema, depth + 1);
            }
            out.push('\n');
            push_indent(out, depth);
        }
    }

    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

/// Default namespace first, then prefixed declarations, then plain attributes.
fn ordered_attrs(attrs: &[(String, String)]) -> Vec<&(String, String)> {
    let rank = |name: &str| {
        if name == "xmlns" {
            0
        } else if name.starts_with("xmlns:") {
            1
        } else {
            2
        }
    };
    let mut ordered: Vec<_> = attrs.iter().collect();
    ordered.sort_by_key(|(name, _)| rank(name));
    ordered
}

/// Children in schema order, each paired with its own nested schema.
fn ordered_children<'a>(
    children: &'a [Element],
    schema: Option<&'a RecordSchema>,
) -> Vec<(&'a Element, Option<&'a RecordSchema>)> {
    let Some(schema) = schema else {
        return children.iter().map(|c| (c, None)).collect();
    };

    let mut anchor: Option<usize> = None;
    let mut keyed: Vec<((Option<usize>, bool), &Element, Option<&RecordSchema>)> =
        Vec::with_capacity(children.len());
    for child in children {
        match schema.index_of(&child.name) {
            Some(idx) => {
                anchor = Some(idx);
                let nested = schema.fields[idx].nested();
                keyed.push(((Some(idx), false), child, nested));
            }
            None => keyed.push(((anchor, true), child, None)),
        }
    }

    keyed.sort_by_key(|(key, _, _)| *key);
    keyed
        .into_iter()
        .map(|(_, child, nested)| (child, nested))
        .collect()
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Escapes text and attribute values the way platform exports do.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}
