//! Markup emission for a single tag.

use crate::tag::{TagKind, TagTable};

/// Write one tag around `content`.
///
/// Self-closing kinds ignore both content and attributes and become
/// `[name/]`. Other kinds become `[name]content[/name]`, with attributes
/// written as `key="value"` pairs in iteration order when there are any.
/// Values are not escaped, so a value containing `"` will not read back.
///
/// # Examples
///
/// ```
/// use markup::{write_tag, TagKind, TagTable};
///
/// let table = TagTable::global();
/// assert_eq!(write_tag(table, TagKind::NewLine, "ignored", [("a", "b")]), "[br/]");
/// assert_eq!(write_tag(table, TagKind::Bold, "hi", [("color", "red")]), r#"[b color="red"]hi[/b]"#);
/// ```
pub fn write_tag<I, K, V>(table: &TagTable, kind: TagKind, content: &str, attributes: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    if kind.is_self_closing() {
        return format!("[{}/]", table.name(kind));
    }
    format!(
        "{}{content}{}",
        open_tag(table, kind, attributes),
        close_tag(table, kind)
    )
}

/// Opening half of a tag that wraps content: `[name]` or `[name k="v"]`.
pub(crate) fn open_tag<I, K, V>(table: &TagTable, kind: TagKind, attributes: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let name = table.name(kind);
    let attrs = attributes
        .into_iter()
        .map(|(k, v)| format!("{}=\"{}\"", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>();

    if attrs.is_empty() {
        format!("[{name}]")
    } else {
        format!("[{name} {}]", attrs.join(" "))
    }
}

pub(crate) fn close_tag(table: &TagTable, kind: TagKind) -> String {
    format!("[/{}]", table.name(kind))
}

/// Write a tag that has no attributes.
pub fn write_plain_tag(table: &TagTable, kind: TagKind, content: &str) -> String {
    write_tag(table, kind, content, std::iter::empty::<(&str, &str)>())
}
