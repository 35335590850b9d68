//! Attribute parser for tag content.
//!
//! Picks every `name = "value"` pair out of the text between a tag's name and
//! its end marker. Anything that does not form a complete pair is skipped.
//! Values cannot contain `"` and cannot span lines.

use crate::node::Attributes;

use super::lexer::{is_line_terminator, skip_name, skip_space};

/// Parse attributes from tag content.
///
/// Later duplicates overwrite earlier ones. Never fails; content with no
/// complete pair gives an empty map.
///
/// # Examples
///
/// ```
/// use markup::parser::parse_attributes;
///
/// let attrs = parse_attributes(r#"color="red" size = "12""#);
/// assert_eq!(attrs.get("color").map(String::as_str), Some("red"));
/// assert_eq!(attrs.get("size").map(String::as_str), Some("12"));
///
/// assert!(parse_attributes(r#"color="red"#).is_empty());
/// ```
pub fn parse_attributes(content: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut pos = 0;

    while pos < content.len() {
        match match_pair_at(content, pos) {
            Some((name, value, end)) => {
                attrs.insert(name.to_string(), value.to_string());
                pos = end;
            }
            None => {
                pos += content[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    attrs
}

/// Match one `name = "value"` pair starting exactly at `start`.
///
/// Returns the name, the value, and the byte offset just past the closing
/// quote.
fn match_pair_at(content: &str, start: usize) -> Option<(&str, &str, usize)> {
    let name_end = skip_name(content, start);
    if name_end == start {
        return None;
    }

    let mut pos = skip_space(content, name_end);
    if !content[pos..].starts_with('=') {
        return None;
    }
    pos = skip_space(content, pos + 1);
    if !content[pos..].starts_with('"') {
        return None;
    }

    let value_start = pos + 1;
    for (offset, c) in content[value_start..].char_indices() {
        if c == '"' {
            let value_end = value_start + offset;
            return Some((
                &content[start..name_end],
                &content[value_start..value_end],
                value_end + 1,
            ));
        }
        if is_line_terminator(c) {
            return None;
        }
    }
    None
}
