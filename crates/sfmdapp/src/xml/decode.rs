//! Lenient decoding of metadata XML into an [`Element`] tree.
//!
//! Files come from many tools, so decoding is deliberately forgiving:
//!
//! - **Charsets**: UTF-8 (with or without BOM), UTF-16 with a BOM, and
//!   single-byte Latin-1 / Windows-1252 declared in the prolog are all
//!   transcoded to UTF-8 before parsing.
//! - **Entities**: references other than the five predefined ones and numeric
//!   character references are kept as literal text instead of failing the
//!   parse. A bare `&` is treated the same way.
//! - **Prolog**: the XML declaration is discarded; the encoder always writes
//!   its own.
//!
//! Parsing itself is done by `roxmltree`; the result is copied into an owned
//! tree so it can be edited.

use super::element::{Body, Element};
use crate::error::{MdError, Result};
use std::path::Path;

/// Decodes raw file bytes. `path` is only used for error reporting.
pub fn decode(bytes: &[u8], path: &Path) -> Result<Element> {
    let text = transcode(bytes).map_err(|cause| MdError::parse(path, cause))?;
    parse_str(&text, path)
}

/// Decodes an in-memory UTF-8 document.
pub fn parse_str(text: &str, path: &Path) -> Result<Element> {
    let body = strip_prolog(text);
    let sanitized = escape_unknown_entities(body);
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(&sanitized, options)
        .map_err(|e| MdError::parse(path, e))?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut attrs = declared_namespaces(node);
    for attr in node.attributes() {
        attrs.push((qualified(node, attr.namespace(), attr.name()), attr.value().to_string()));
    }

    let tag = node.tag_name();
    let name = qualified(node, tag.namespace(), tag.name());

    let has_elements = node.children().any(|c| c.is_element());
    let body = if has_elements {
        Body::Children(
            node.children()
                .filter(|c| c.is_element())
                .map(convert)
                .collect(),
        )
    } else {
        Body::Text(
            node.children()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .collect(),
        )
    };

    Element { name, attrs, body }
}

/// Namespace declarations made on this element (not inherited ones).
fn declared_namespaces(node: roxmltree::Node<'_, '_>) -> Vec<(String, String)> {
    let parent: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !parent.contains(&(ns.name(), ns.uri())))
        .map(|ns| match ns.name() {
            Some(prefix) => (format!("xmlns:{}", prefix), ns.uri().to_string()),
            None => ("xmlns".to_string(), ns.uri().to_string()),
        })
        .collect()
}

fn qualified(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    let prefix = namespace.and_then(|uri| node.lookup_prefix(uri));
    match prefix {
        Some(p) if !p.is_empty() => format!("{}:{}", p, local),
        _ => local.to_string(),
    }
}

fn strip_prolog(text: &str) -> &str {
    let trimmed = text.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    text
}

const PREDEFINED_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Rewrites every `&` that does not start a predefined or numeric reference
/// as `&amp;`, so the parser keeps it as literal text. CDATA sections and
/// comments are copied untouched.
fn escape_unknown_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(&['&', '<'][..]) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('<') {
            let verbatim = [("<![CDATA[", "]]>"), ("<!--", "-->")]
                .iter()
                .find(|(open, _)| rest.starts_with(open))
                .map(|(open, close)| {
                    rest[open.len()..]
                        .find(close)
                        .map(|end| open.len() + end + close.len())
                        .unwrap_or(rest.len())
                });
            let len = verbatim.unwrap_or(1);
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }

        if is_known_reference(&rest[1..]) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = &rest[1..];
    }

    out.push_str(rest);
    out
}

fn is_known_reference(after_amp: &str) -> bool {
    let Some(end) = after_amp.find(';') else {
        return false;
    };
    let name = &after_amp[..end];
    if let Some(num) = name.strip_prefix('#') {
        return match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        };
    }
    PREDEFINED_ENTITIES.contains(&name)
}

/// Converts raw bytes to a UTF-8 string according to BOM or declared charset.
fn transcode(bytes: &[u8]) -> std::result::Result<String, String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec()).map_err(|e| e.to_string());
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return Ok(decode_utf16(rest, u16::from_le_bytes));
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return Ok(decode_utf16(rest, u16::from_be_bytes));
    }

    let label = declared_encoding(bytes).unwrap_or_else(|| "utf-8".to_string());
    match label.as_str() {
        "utf-8" | "utf8" => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            // Mislabelled legacy files are usually Windows-1252.
            Err(_) => Ok(decode_single_byte(bytes)),
        },
        "us-ascii" | "ascii" | "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1"
        | "windows-1252" | "cp1252" => Ok(decode_single_byte(bytes)),
        other => Err(format!("unsupported encoding '{}'", other)),
    }
}

fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head_len = bytes.len().min(256);
    let head = String::from_utf8_lossy(&bytes[..head_len]);
    let prolog_end = head.find("?>")?;
    let prolog = &head[..prolog_end];
    if !prolog.trim_start().starts_with("<?xml") {
        return None;
    }
    let after = &prolog[prolog.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let value = &after[1..];
    let end = value.find(quote)?;
    Some(value[..end].trim().to_ascii_lowercase())
}

fn decode_utf16(bytes: &[u8], read: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| read([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Windows-1252 code points for bytes 0x80..=0x9F; the rest of the byte range
/// maps straight to Latin-1.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8D}', '\u{017D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{9D}', '\u{017E}', '\u{0178}',
];

fn decode_single_byte(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Element {
        parse_str(text, Path::new("test.xml")).unwrap()
    }

    #[test]
    fn keeps_root_namespace_as_attribute() {
        let root = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Profile xmlns="http://soap.sforce.com/2006/04/metadata">
    <custom>false</custom>
</Profile>"#,
        );
        assert_eq!(root.name, "Profile");
        assert_eq!(
            root.attr("xmlns"),
            Some("http://soap.sforce.com/2006/04/metadata")
        );
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].text(), Some("false"));
    }

    #[test]
    fn empty_elements_decode_as_empty_text() {
        let root = parse("<R><a/><b></b></R>");
        assert_eq!(root.children()[0].text(), Some(""));
        assert_eq!(root.children()[1].text(), Some(""));
    }

    #[test]
    fn leaf_whitespace_is_preserved() {
        let root = parse("<R><a>  padded </a></R>");
        assert_eq!(root.children()[0].text(), Some("  padded "));
    }

    #[test]
    fn unknown_entities_survive_as_text() {
        let root = parse("<R><a>Terms &nbsp; &amp; Conditions & more</a></R>");
        assert_eq!(
            root.children()[0].text(),
            Some("Terms &nbsp; & Conditions & more")
        );
    }

    #[test]
    fn numeric_references_are_decoded() {
        let root = parse("<R><a>&#65;&#x42;</a></R>");
        assert_eq!(root.children()[0].text(), Some("AB"));
    }

    #[test]
    fn cdata_is_merged_into_text() {
        let root = parse("<R><a><![CDATA[x & y]]></a></R>");
        assert_eq!(root.children()[0].text(), Some("x & y"));
    }

    #[test]
    fn prefixed_attributes_keep_their_prefix() {
        let root = parse(
            r#"<R xmlns="urn:a" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><v xsi:nil="true"/></R>"#,
        );
        assert_eq!(root.attr("xmlns"), Some("urn:a"));
        assert!(root.attr("xmlns:xsi").is_some());
        assert_eq!(root.children()[0].attr("xsi:nil"), Some("true"));
        assert!(root.children()[0].attrs.iter().all(|(k, _)| !k.starts_with("xmlns")));
    }

    #[test]
    fn latin1_prolog_is_transcoded() {
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><R><a>caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</a></R>");
        let root = decode(&bytes, Path::new("latin.xml")).unwrap();
        assert_eq!(root.children()[0].text(), Some("café"));
    }

    #[test]
    fn utf16_bom_is_transcoded() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<R><a>x</a></R>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let root = decode(&bytes, Path::new("utf16.xml")).unwrap();
        assert_eq!(root.children()[0].text(), Some("x"));
    }

    #[test]
    fn malformed_input_is_a_parse_error_with_path() {
        let err = parse_str("<R><a></R>", Path::new("broken.profile")).unwrap_err();
        match err {
            MdError::Parse { path, .. } => assert_eq!(path, Path::new("broken.profile")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_charset_is_rejected() {
        let err = decode(
            b"<?xml version=\"1.0\" encoding=\"EBCDIC\"?><R/>",
            Path::new("odd.xml"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported encoding"));
    }
}
