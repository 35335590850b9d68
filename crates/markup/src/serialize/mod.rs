//! Serializer from a rendered rich-text tree back to markup.
//!
//! The serializer works on any [`PresentationTree`]: an ordered tree of
//! elements (with a tag name) and text nodes. It reduces the tree in place:
//!
//! 1. whitespace-only branches at the outer edges are removed ([`trim`]);
//! 2. literal `[` and `]` in text become bracket tags ([`escape_brackets`]);
//! 3. every node, innermost first, is replaced by a text node holding its
//!    markup;
//! 4. the root's text, with non-breaking spaces turned into spaces, is the
//!    result.

mod normalize;

pub use normalize::{escape_brackets, escape_text, trim};

use crate::tag::{TagKind, TagTable};
use crate::writer::write_plain_tag;

/// What a presentation node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// A text node and its content.
    Text(&'a str),
    /// An element and its tag name.
    Element(&'a str),
}

/// The minimal tree capability the serializer needs.
///
/// Implementations hand out cheap node handles. Handles of removed or
/// replaced nodes are never used again by the serializer.
pub trait PresentationTree {
    type Node: Copy + Eq + std::fmt::Debug;

    /// The node whose children are serialized. It is never written as a tag.
    fn root(&self) -> Self::Node;

    /// Children of `node`, in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn kind(&self, node: Self::Node) -> NodeKind<'_>;

    /// Replace the content of a text node.
    fn set_text(&mut self, node: Self::Node, text: String);

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Put a new text node holding `text` where `child` was.
    fn replace_with_text(&mut self, parent: Self::Node, child: Self::Node, text: String);

    /// Concatenated text of `node` and all of its descendants.
    fn text_content(&self, node: Self::Node) -> String {
        match self.kind(node) {
            NodeKind::Text(text) => text.to_string(),
            NodeKind::Element(_) => self
                .children(node)
                .into_iter()
                .map(|child| self.text_content(child))
                .collect(),
        }
    }

    fn has_children(&self, node: Self::Node) -> bool {
        !self.children(node).is_empty()
    }
}

/// Map a presentation element's tag name to the tag it is written as.
///
/// Names compare ASCII-case-insensitively. Anything unrecognized becomes a
/// generic `line`.
pub fn element_tag_kind(tag_name: &str) -> TagKind {
    const KINDS: [(&str, TagKind); 5] = [
        ("br", TagKind::NewLine),
        ("b", TagKind::Bold),
        ("strong", TagKind::Bold),
        ("i", TagKind::Italic),
        ("u", TagKind::Underline),
    ];
    KINDS
        .iter()
        .find(|(name, _)| tag_name.eq_ignore_ascii_case(name))
        .map_or(TagKind::Line, |(_, kind)| *kind)
}

/// Serializes presentation trees with a specific tag table.
#[derive(Clone, Copy, Debug)]
pub struct MarkupSerializer<'t> {
    table: &'t TagTable,
}

impl<'t> MarkupSerializer<'t> {
    pub fn new(table: &'t TagTable) -> Self {
        Self { table }
    }

    /// Reduce `tree` to markup.
    ///
    /// The tree is rewritten in place: afterwards the root holds only text
    /// nodes. Use [`serialize_detached`](Self::serialize_detached) to keep the
    /// original intact.
    pub fn serialize<T: PresentationTree>(&self, tree: &mut T) -> String {
        trim(tree);
        escape_brackets(tree, self.table);

        let root = tree.root();
        self.substitute(tree, root);

        let markup = tree.text_content(root).replace('\u{a0}', " ");
        log::debug!("serialized presentation tree to {} bytes of markup", markup.len());
        markup
    }

    /// Serialize a copy of `tree`, leaving the caller's tree untouched.
    ///
    /// A missing tree serializes to an empty string.
    pub fn serialize_detached<T>(&self, tree: Option<&T>) -> String
    where
        T: PresentationTree + Clone,
    {
        match tree {
            Some(tree) => self.serialize(&mut tree.clone()),
            None => String::new(),
        }
    }

    /// Replace every child of `node`, innermost first, by its markup text.
    fn substitute<T: PresentationTree>(&self, tree: &mut T, node: T::Node) {
        for child in tree.children(node) {
            self.substitute(tree, child);

            let kind = match tree.kind(child) {
                NodeKind::Text(_) => None,
                NodeKind::Element(name) => Some(element_tag_kind(name)),
            };
            let content = tree.text_content(child);
            let text = match kind {
                Some(kind) => write_plain_tag(self.table, kind, &content),
                None => content,
            };
            tree.replace_with_text(node, child, text);
        }
    }
}

impl Default for MarkupSerializer<'static> {
    fn default() -> Self {
        Self::new(TagTable::global())
    }
}

/// Reduce `tree` to markup with the default tag table.
///
/// # Examples
///
/// ```
/// use markup::dom::Fragment;
/// use markup::serialize::serialize;
///
/// let mut fragment = Fragment::from_html("  <b>Hello</b> [world]<br>  ");
/// assert_eq!(
///     serialize(&mut fragment),
///     "[b]Hello[/b] [square-bracket/]world[square-bracket-end/]"
/// );
/// ```
pub fn serialize<T: PresentationTree>(tree: &mut T) -> String {
    MarkupSerializer::default().serialize(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Fragment;

    #[test]
    fn element_kinds() {
        assert_eq!(element_tag_kind("BR"), TagKind::NewLine);
        assert_eq!(element_tag_kind("b"), TagKind::Bold);
        assert_eq!(element_tag_kind("STRONG"), TagKind::Bold);
        assert_eq!(element_tag_kind("i"), TagKind::Italic);
        assert_eq!(element_tag_kind("U"), TagKind::Underline);
        assert_eq!(element_tag_kind("div"), TagKind::Line);
        assert_eq!(element_tag_kind("em"), TagKind::Line);
    }

    #[test]
    fn serialize_nested_elements() {
        let mut fragment = Fragment::new();
        let root = fragment.root();
        let b = fragment.append_element(root, "b");
        fragment.append_text(b, "x ");
        let i = fragment.append_element(b, "i");
        fragment.append_text(i, "y");

        assert_eq!(serialize(&mut fragment), "[b]x [i]y[/i][/b]");
    }

    #[test]
    fn serialize_reduces_tree_in_place() {
        let mut fragment = Fragment::from_html("<b>x</b>");
        serialize(&mut fragment);
        let root = fragment.root();
        let children = PresentationTree::children(&fragment, root);
        assert_eq!(children.len(), 1);
        assert_eq!(fragment.kind(children[0]), NodeKind::Text("[b]x[/b]"));
    }

    #[test]
    fn serialize_detached_keeps_original() {
        let fragment = Fragment::from_html("<u>x</u>");
        let before = fragment.to_html();
        let markup = MarkupSerializer::default().serialize_detached(Some(&fragment));
        assert_eq!(markup, "[u]x[/u]");
        assert_eq!(fragment.to_html(), before);
    }

    #[test]
    fn serialize_missing_tree_is_empty() {
        let markup = MarkupSerializer::default().serialize_detached::<Fragment>(None);
        assert_eq!(markup, "");
    }

    #[test]
    fn non_breaking_spaces_become_spaces() {
        let mut fragment = Fragment::from_html("a&nbsp;b\u{a0}c");
        assert_eq!(serialize(&mut fragment), "a b c");
    }

    #[test]
    fn custom_table_names() {
        let table = TagTable::builder()
            .rename(TagKind::Bold, "strong")
            .unwrap()
            .build();
        let mut fragment = Fragment::from_html("<b>x</b>");
        assert_eq!(
            MarkupSerializer::new(&table).serialize(&mut fragment),
            "[strong]x[/strong]"
        );
    }
}
