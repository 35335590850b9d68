//! Tag vocabulary for chat markup.
//!
//! A [`TagKind`] is one of the closed set of structural tags a message can
//! contain. A [`TagTable`] maps the names written inside brackets to kinds and
//! picks the canonical spelling used when markup is written back out.
//!
//! The default vocabulary:
//!
//! ```text
//! line                 generic container, also the implicit root
//! b, bold              bold
//! i, italic            italic
//! u, underline         underline
//! br, new-line         line break (self-closing)
//! square-bracket       literal `[` (self-closing)
//! square-bracket-end   literal `]` (self-closing)
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use phf::phf_map;

use crate::error::TagTableError;

/// A recognized structural tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKind {
    /// Generic container. The parse root is a `Line`.
    Line,
    Bold,
    Italic,
    Underline,
    /// Line break.
    NewLine,
    /// A literal `[` that must not be read as tag syntax.
    SquareBracket,
    /// A literal `]` that must not be read as tag syntax.
    SquareBracketEnd,
}

impl TagKind {
    /// Every kind, in declaration order.
    pub const ALL: [TagKind; 7] = [
        TagKind::Line,
        TagKind::Bold,
        TagKind::Italic,
        TagKind::Underline,
        TagKind::NewLine,
        TagKind::SquareBracket,
        TagKind::SquareBracketEnd,
    ];

    /// Returns true if tags of this kind are written `[name/]` and never
    /// carry content.
    pub fn is_self_closing(self) -> bool {
        matches!(
            self,
            TagKind::NewLine | TagKind::SquareBracket | TagKind::SquareBracketEnd
        )
    }

    /// The canonical name of this kind in the default vocabulary.
    pub fn default_name(self) -> &'static str {
        match self {
            TagKind::Line => "line",
            TagKind::Bold => "b",
            TagKind::Italic => "i",
            TagKind::Underline => "u",
            TagKind::NewLine => "br",
            TagKind::SquareBracket => "square-bracket",
            TagKind::SquareBracketEnd => "square-bracket-end",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Names accepted by the default vocabulary, canonical spellings included.
static DEFAULT_NAMES: phf::Map<&'static str, TagKind> = phf_map! {
    "line" => TagKind::Line,
    "b" => TagKind::Bold,
    "bold" => TagKind::Bold,
    "i" => TagKind::Italic,
    "italic" => TagKind::Italic,
    "u" => TagKind::Underline,
    "underline" => TagKind::Underline,
    "br" => TagKind::NewLine,
    "new-line" => TagKind::NewLine,
    "square-bracket" => TagKind::SquareBracket,
    "square-bracket-end" => TagKind::SquareBracketEnd,
};

static DEFAULT_TABLE: Lazy<TagTable> = Lazy::new(TagTable::default_vocabulary);

/// Returns true if `c` may appear in a tag or attribute name.
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Returns true if `name` is a syntactically valid tag name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

/// Maps tag names to kinds.
///
/// Every kind always has exactly one canonical name, which is what the
/// serializer emits. Any number of extra aliases may resolve to the same
/// kind.
#[derive(Clone, Debug)]
pub struct TagTable {
    by_name: HashMap<String, TagKind>,
    canonical: HashMap<TagKind, String>,
}

impl TagTable {
    /// The shared default vocabulary.
    pub fn global() -> &'static TagTable {
        &DEFAULT_TABLE
    }

    /// Start a custom table from the default vocabulary.
    pub fn builder() -> TagTableBuilder {
        TagTableBuilder {
            table: Self::default_vocabulary(),
        }
    }

    fn default_vocabulary() -> Self {
        let by_name = DEFAULT_NAMES
            .entries()
            .map(|(name, kind)| (name.to_string(), *kind))
            .collect();
        let canonical = TagKind::ALL
            .iter()
            .map(|kind| (*kind, kind.default_name().to_string()))
            .collect();
        Self { by_name, canonical }
    }

    /// Look up the kind for a tag name. Names are case-sensitive.
    pub fn resolve(&self, name: &str) -> Option<TagKind> {
        self.by_name.get(name).copied()
    }

    /// Returns true if `name` is part of this vocabulary.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The canonical name written for `kind`.
    pub fn name(&self, kind: TagKind) -> &str {
        self.canonical
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_name())
    }

    /// All accepted names with their kinds, sorted by name.
    pub fn names(&self) -> Vec<(&str, TagKind)> {
        let mut names: Vec<_> = self
            .by_name
            .iter()
            .map(|(name, kind)| (name.as_str(), *kind))
            .collect();
        names.sort();
        names
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::default_vocabulary()
    }
}

/// Builder for a customized [`TagTable`].
///
/// # Examples
///
/// ```
/// use markup::{TagKind, TagTable};
///
/// let table = TagTable::builder()
///     .rename(TagKind::Bold, "strong")
///     .unwrap()
///     .alias("em", TagKind::Italic)
///     .unwrap()
///     .build();
///
/// assert_eq!(table.resolve("strong"), Some(TagKind::Bold));
/// assert_eq!(table.resolve("b"), None);
/// assert_eq!(table.resolve("em"), Some(TagKind::Italic));
/// assert_eq!(table.name(TagKind::Bold), "strong");
/// ```
#[derive(Clone, Debug)]
pub struct TagTableBuilder {
    table: TagTable,
}

impl TagTableBuilder {
    /// Replace the canonical name of `kind`. The previous canonical name no
    /// longer resolves; aliases are kept.
    pub fn rename(mut self, kind: TagKind, name: &str) -> Result<Self, TagTableError> {
        self.check(name, kind)?;
        if let Some(old) = self.table.canonical.insert(kind, name.to_string()) {
            if old != name {
                self.table.by_name.remove(&old);
            }
        }
        self.table.by_name.insert(name.to_string(), kind);
        Ok(self)
    }

    /// Accept `name` as another spelling of `kind`.
    pub fn alias(mut self, name: &str, kind: TagKind) -> Result<Self, TagTableError> {
        self.check(name, kind)?;
        self.table.by_name.insert(name.to_string(), kind);
        Ok(self)
    }

    /// Finish building the table.
    pub fn build(self) -> TagTable {
        self.table
    }

    fn check(&self, name: &str, kind: TagKind) -> Result<(), TagTableError> {
        if !is_valid_name(name) {
            return Err(TagTableError::InvalidName(name.to_string()));
        }
        match self.table.resolve(name) {
            Some(existing) if existing != kind => Err(TagTableError::NameConflict {
                name: name.to_string(),
                existing,
                requested: kind,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_resolves_canonical_names() {
        let table = TagTable::global();
        for kind in TagKind::ALL {
            assert_eq!(table.resolve(table.name(kind)), Some(kind));
        }
    }

    #[test]
    fn default_table_resolves_aliases() {
        let table = TagTable::global();
        assert_eq!(table.resolve("bold"), Some(TagKind::Bold));
        assert_eq!(table.resolve("italic"), Some(TagKind::Italic));
        assert_eq!(table.resolve("underline"), Some(TagKind::Underline));
        assert_eq!(table.resolve("new-line"), Some(TagKind::NewLine));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(TagTable::global().resolve("B"), None);
        assert!(!TagTable::global().contains("Bold"));
    }

    #[test]
    fn self_closing_kinds() {
        assert!(TagKind::NewLine.is_self_closing());
        assert!(TagKind::SquareBracket.is_self_closing());
        assert!(TagKind::SquareBracketEnd.is_self_closing());
        assert!(!TagKind::Line.is_self_closing());
        assert!(!TagKind::Bold.is_self_closing());
    }

    #[test]
    fn rename_drops_previous_name() {
        let table = TagTable::builder()
            .rename(TagKind::NewLine, "nl")
            .unwrap()
            .build();
        assert_eq!(table.resolve("nl"), Some(TagKind::NewLine));
        assert_eq!(table.resolve("br"), None);
        assert_eq!(table.resolve("new-line"), Some(TagKind::NewLine));
        assert_eq!(table.name(TagKind::NewLine), "nl");
    }

    #[test]
    fn rename_to_same_name_is_noop() {
        let table = TagTable::builder()
            .rename(TagKind::Bold, "b")
            .unwrap()
            .build();
        assert_eq!(table.resolve("b"), Some(TagKind::Bold));
        assert_eq!(table.name(TagKind::Bold), "b");
    }

    #[test]
    fn invalid_names_rejected() {
        let err = TagTable::builder().alias("", TagKind::Bold).unwrap_err();
        assert_eq!(err, TagTableError::InvalidName(String::new()));

        let err = TagTable::builder().alias("a b", TagKind::Bold).unwrap_err();
        assert_eq!(err, TagTableError::InvalidName("a b".to_string()));
    }

    #[test]
    fn conflicting_alias_rejected() {
        let err = TagTable::builder().alias("b", TagKind::Italic).unwrap_err();
        assert_eq!(
            err,
            TagTableError::NameConflict {
                name: "b".to_string(),
                existing: TagKind::Bold,
                requested: TagKind::Italic,
            }
        );
    }

    #[test]
    fn valid_name_charset() {
        assert!(is_valid_name("square-bracket-end"));
        assert!(is_valid_name("h_1"));
        assert!(!is_valid_name("é"));
        assert!(!is_valid_name("a/b"));
    }
}
