//! The `"true"` / `"false"` text convention used for boolean leaves.
//!
//! Metadata files never carry real booleans: every flag is a text node whose
//! content is exactly `true` or `false`. Anything else (including an empty
//! element) is not a boolean as far as decoding is concerned.

pub const TRUE_TEXT: &str = "true";
pub const FALSE_TEXT: &str = "false";

/// Canonical text for a boolean value.
pub fn encode(value: bool) -> &'static str {
    if value {
        TRUE_TEXT
    } else {
        FALSE_TEXT
    }
}

/// Strict decode: only the two canonical spellings are accepted.
pub fn decode(text: &str) -> Option<bool> {
    match text {
        TRUE_TEXT => Some(true),
        FALSE_TEXT => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_canonical_text() {
        assert_eq!(encode(true), "true");
        assert_eq!(encode(false), "false");
    }

    #[test]
    fn decode_is_strict() {
        assert_eq!(decode("true"), Some(true));
        assert_eq!(decode("false"), Some(false));
        assert_eq!(decode("True"), None);
        assert_eq!(decode(" true"), None);
        assert_eq!(decode(""), None);
    }
}
