//! Parsed message tree.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::tag::{TagKind, TagTable};
use crate::writer::{close_tag, open_tag, write_tag};

/// Attributes of a tag, keyed by name.
pub type Attributes = BTreeMap<String, String>;

/// A node of a parsed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(TextNode),
    Tag(TagNode),
}

/// A run of literal characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    pub text: String,
}

/// A recognized tag and everything nested inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagNode {
    pub kind: TagKind,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TagNode {
    /// Create a tag with no attributes and no children.
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style child setter.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Builder-style attribute setter. A repeated key replaces the old value.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl Drop for TagNode {
    // Descendants are unlinked onto a worklist; drop depth stays constant.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Tag(mut tag) = node {
                pending.append(&mut tag.children);
            }
        }
    }
}

impl Node {
    /// Shorthand for a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::new(text))
    }

    /// Shorthand for a tag node with children and no attributes.
    pub fn tag(kind: TagKind, children: Vec<Node>) -> Self {
        Node::Tag(TagNode::new(kind).with_children(children))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(&t.text),
            Node::Tag(_) => None,
        }
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Node::Tag(t) => Some(t),
            Node::Text(_) => None,
        }
    }

    /// The text a reader would see, with markup removed.
    ///
    /// Line breaks render as `\n` and escaped brackets as the brackets
    /// themselves.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::Text(t) => out.push_str(&t.text),
                Node::Tag(tag) => match tag.kind {
                    TagKind::NewLine => out.push('\n'),
                    TagKind::SquareBracket => out.push('['),
                    TagKind::SquareBracketEnd => out.push(']'),
                    _ => pending.extend(tag.children.iter().rev()),
                },
            }
        }
        out
    }
}

/// Plain text of a whole node sequence.
pub fn plain_text(nodes: &[Node]) -> String {
    nodes.iter().map(Node::plain_text).collect()
}

/// Write a node sequence back out as markup.
///
/// Text is emitted verbatim and tags go through [`write_tag`], so this is the
/// inverse of parsing for trees that came from well-formed markup.
pub fn render_markup(nodes: &[Node], table: &TagTable) -> String {
    enum Step<'a> {
        Visit(&'a Node),
        Close(TagKind),
    }

    let mut out = String::new();
    let mut pending: Vec<Step<'_>> = nodes.iter().rev().map(Step::Visit).collect();
    while let Some(step) = pending.pop() {
        match step {
            Step::Visit(Node::Text(t)) => out.push_str(&t.text),
            Step::Visit(Node::Tag(tag)) if tag.kind.is_self_closing() => {
                out.push_str(&write_tag(table, tag.kind, "", &tag.attributes));
            }
            Step::Visit(Node::Tag(tag)) => {
                out.push_str(&open_tag(table, tag.kind, &tag.attributes));
                pending.push(Step::Close(tag.kind));
                pending.extend(tag.children.iter().rev().map(Step::Visit));
            }
            Step::Close(kind) => out.push_str(&close_tag(table, kind)),
        }
    }
    out
}

/// Indented one-node-per-line dump of a tree, for debugging and snapshots.
///
/// ```text
/// b
///   "hello"
/// br
/// ```
pub fn outline(nodes: &[Node]) -> String {
    let mut out = String::new();
    let mut pending: Vec<(&Node, usize)> = nodes.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = pending.pop() {
        let indent = "  ".repeat(depth);
        match node {
            Node::Text(t) => {
                let _ = writeln!(out, "{indent}{:?}", t.text);
            }
            Node::Tag(tag) => {
                let _ = write!(out, "{indent}{}", tag.kind);
                for (key, value) in &tag.attributes {
                    let _ = write!(out, " {key}={value:?}");
                }
                out.push('\n');
                pending.extend(tag.children.iter().rev().map(|child| (child, depth + 1)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_resolves_escapes_and_breaks() {
        let nodes = vec![
            Node::tag(TagKind::Bold, vec![Node::text("hi")]),
            Node::tag(TagKind::NewLine, vec![]),
            Node::tag(TagKind::SquareBracket, vec![]),
            Node::text("x"),
            Node::tag(TagKind::SquareBracketEnd, vec![]),
        ];
        assert_eq!(plain_text(&nodes), "hi\n[x]");
    }

    #[test]
    fn render_markup_writes_nested_tags() {
        let nodes = vec![
            Node::text("a "),
            Node::tag(
                TagKind::Bold,
                vec![Node::tag(TagKind::Italic, vec![Node::text("b")])],
            ),
            Node::tag(TagKind::NewLine, vec![]),
        ];
        assert_eq!(
            render_markup(&nodes, TagTable::global()),
            "a [b][i]b[/i][/b][br/]"
        );
    }

    #[test]
    fn render_markup_writes_attributes_in_key_order() {
        let tag = TagNode::new(TagKind::Line)
            .with_attribute("size", "12")
            .with_attribute("color", "red")
            .with_children(vec![Node::text("x")]);
        assert_eq!(
            render_markup(&[Node::Tag(tag)], TagTable::global()),
            r#"[line color="red" size="12"]x[/line]"#
        );
    }

    #[test]
    fn outline_format() {
        let nodes = vec![
            Node::Tag(
                TagNode::new(TagKind::Bold)
                    .with_attribute("k", "v")
                    .with_children(vec![Node::text("hello")]),
            ),
            Node::tag(TagKind::NewLine, vec![]),
        ];
        insta::assert_snapshot!(outline(&nodes), @r#"
        b k="v"
          "hello"
        br
        "#);
    }

    #[test]
    fn self_closing_kind_drops_children_when_rendered() {
        let nodes = vec![Node::tag(TagKind::NewLine, vec![Node::text("x")])];
        assert_eq!(render_markup(&nodes, TagTable::global()), "[br/]");
    }

    #[test]
    fn deep_trees_render_and_drop() {
        let depth = 200_000;
        let mut node = Node::text("x");
        for _ in 0..depth {
            node = Node::tag(TagKind::Italic, vec![node]);
        }
        let nodes = vec![node];

        assert_eq!(plain_text(&nodes), "x");
        let markup = render_markup(&nodes, TagTable::global());
        assert_eq!(markup.len(), depth * "[i][/i]".len() + 1);
        assert!(markup.starts_with("[i][i]"));
        drop(nodes);
    }

    #[test]
    fn accessors() {
        let node = Node::text("x");
        assert_eq!(node.as_text(), Some("x"));
        assert!(node.as_tag().is_none());

        let tag = TagNode::new(TagKind::Line).with_attribute("a", "1");
        assert_eq!(tag.attribute("a"), Some("1"));
        assert_eq!(tag.attribute("b"), None);
    }
}
