//! Dotted property path utilities.
//!
//! A property path addresses nested mappings with `.` between segments. A
//! backslash escapes the character after it, so `\.` keeps a dot inside a
//! segment and `\\` yields a literal backslash.
//!
//! # Example
//!
//! ```
//! use layer_patch_path::{format_property_path, parse_property_path};
//!
//! let path = parse_property_path("sub_object.sub\\.hey");
//! assert_eq!(path, vec!["sub_object".to_string(), "sub.hey".to_string()]);
//!
//! assert_eq!(format_property_path(&path), "sub_object.sub\\.hey");
//! ```

pub mod validate;
pub use validate::{validate_path, validate_property_path, ValidationError};

/// A single segment of a property path.
pub type PathSegment = String;

/// A parsed property path.
pub type Path = Vec<PathSegment>;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Escape character.
pub const ESCAPE: char = '\\';

/// Stand-in for an escaped separator while a path is split.
///
/// U+0091 (PRIVATE USE ONE) is a C1 control character and never appears in
/// real property names; [`validate_property_path`] rejects paths containing it.
pub const SENTINEL: char = '\u{91}';
const SENTINEL_STR: &str = "\u{91}";

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Strips escapes from a raw path.
///
/// Escaped separators are replaced with [`SENTINEL`] first, so they survive
/// the split that follows; every other `\X` becomes `X`.
fn unescape_path(path: &str) -> String {
    let marked = path.replace("\\.", SENTINEL_STR);
    if !marked.contains(ESCAPE) {
        return marked;
    }
    let mut out = String::with_capacity(marked.len());
    let mut chars = marked.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(&next) = chars.peek() {
                if !is_line_terminator(next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Escapes a single path segment.
///
/// # Example
///
/// ```
/// use layer_patch_path::escape_segment;
///
/// assert_eq!(escape_segment("a.b"), "a\\.b");
/// assert_eq!(escape_segment("a\\b"), "a\\\\b");
/// assert_eq!(escape_segment("plain"), "plain");
/// ```
pub fn escape_segment(segment: &str) -> String {
    if !segment.contains(SEPARATOR) && !segment.contains(ESCAPE) {
        return segment.to_string();
    }
    // Backslashes first, otherwise the escapes added for dots get doubled.
    segment.replace('\\', "\\\\").replace('.', "\\.")
}

/// Parses a dotted property path into its unescaped segments.
///
/// A path always has at least one segment; the empty string parses to a
/// single empty segment.
///
/// # Example
///
/// ```
/// use layer_patch_path::parse_property_path;
///
/// assert_eq!(parse_property_path("a.b.c"), vec!["a", "b", "c"]);
/// assert_eq!(parse_property_path("a.b\\.c\\.d.e"), vec!["a", "b.c.d", "e"]);
/// assert_eq!(parse_property_path(""), vec![""]);
/// ```
pub fn parse_property_path(path: &str) -> Path {
    unescape_path(path)
        .split(SEPARATOR)
        .map(|segment| segment.replace(SENTINEL, "."))
        .collect()
}

/// Formats segments into a dotted property path.
///
/// The result parses back to the same segments unless a segment other than
/// the last one ends in a backslash: `\\.` reads as an escaped dot.
pub fn format_property_path(path: &[String]) -> String {
    let mut out = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(&escape_segment(segment));
    }
    out
}

/// Canonical text of a raw path: escapes other than `\.` are resolved,
/// escaped separators stay escaped.
///
/// Two raw paths with the same canonical text address the same property.
///
/// # Example
///
/// ```
/// use layer_patch_path::normalize_property_path;
///
/// assert_eq!(normalize_property_path("a.b\\c"), "a.bc");
/// assert_eq!(normalize_property_path("sub_object.sub\\.hey"), "sub_object.sub\\.hey");
/// ```
pub fn normalize_property_path(path: &str) -> String {
    unescape_path(path).replace(SENTINEL, "\\.")
}

/// Returns the first unescaped segment of a path.
///
/// # Example
///
/// ```
/// use layer_patch_path::base_segment;
///
/// assert_eq!(base_segment("sub_object.count"), "sub_object");
/// assert_eq!(base_segment("a\\.b.c"), "a.b");
/// ```
pub fn base_segment(path: &str) -> PathSegment {
    parse_property_path(path)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Check if a segment is a canonical non-negative array index.
///
/// # Example
///
/// ```
/// use layer_patch_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("12"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("length"));
/// ```
pub fn is_valid_index(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    let bytes = segment.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_segment() {
        assert_eq!(parse_property_path("hey"), vec!["hey"]);
    }

    #[test]
    fn parse_keeps_escaped_dot_inside_segment() {
        assert_eq!(
            parse_property_path("sub_object.sub\\.hey"),
            vec!["sub_object", "sub.hey"]
        );
    }

    #[test]
    fn parse_unescapes_other_characters() {
        assert_eq!(parse_property_path("a\\bc.d"), vec!["abc", "d"]);
        assert_eq!(parse_property_path("a\\\\b"), vec!["a\\b"]);
    }

    #[test]
    fn parse_double_backslash_before_dot_is_escaped_dot() {
        // `\.` is claimed before other escapes, so the leading backslash
        // escapes the sentinel and the dot stays in the segment.
        assert_eq!(parse_property_path("a\\\\.b"), vec!["a.b"]);
    }

    #[test]
    fn parse_trailing_backslash_is_kept() {
        assert_eq!(parse_property_path("a\\"), vec!["a\\"]);
    }

    #[test]
    fn parse_backslash_before_newline_is_kept() {
        assert_eq!(parse_property_path("a\\\nb"), vec!["a\\\nb"]);
    }

    #[test]
    fn parse_empty_segments() {
        assert_eq!(parse_property_path("a..b"), vec!["a", "", "b"]);
        assert_eq!(parse_property_path("."), vec!["", ""]);
    }

    #[test]
    fn format_escapes_segments() {
        let path = vec!["a".to_string(), "b.c.d".to_string(), "e".to_string()];
        assert_eq!(format_property_path(&path), "a.b\\.c\\.d.e");
        assert_eq!(format_property_path(&[]), "");
    }

    #[test]
    fn escape_plain_segment_is_unchanged() {
        assert_eq!(escape_segment("subber-object"), "subber-object");
    }

    #[test]
    fn normalize_resolves_plain_escapes_only() {
        assert_eq!(normalize_property_path("a.b\\c"), "a.bc");
        assert_eq!(normalize_property_path("a.bc"), "a.bc");
        assert_eq!(normalize_property_path("a\\.b.c"), "a\\.b.c");
        assert_eq!(normalize_property_path("x\\\\y"), "x\\y");
    }

    #[test]
    fn base_segment_of_nested_path() {
        assert_eq!(base_segment("sub_object.subber-object.set"), "sub_object");
        assert_eq!(base_segment(""), "");
    }
}
