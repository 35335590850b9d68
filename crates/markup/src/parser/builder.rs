//! Tree builder for chat markup.
//!
//! Runs the token stream through a stack machine. Nodes live in an arena and
//! refer to their children by index while the tree is being assembled; the
//! owned [`Node`] tree is produced once at the end.
//!
//! Matching rules:
//!
//! - an unknown name, or a `[/name/]` token, has no structural effect;
//! - `[name/]` appends a childless tag to the current frame;
//! - `[/name]` closes the current frame only if it is not the root and has
//!   the same kind, otherwise it is ignored;
//! - `[name]` opens a new frame under the current one.
//!
//! Frames still open at the end of input are left open, so trailing text
//! lands in the innermost one.

use crate::node::{Attributes, Node, TagNode, TextNode};
use crate::tag::{TagKind, TagTable};

use super::attr::parse_attributes;
use super::lexer::{Lexer, TagToken, Token};

/// Index of the root frame in the arena.
const ROOT: usize = 0;

/// An arena slot.
#[derive(Debug)]
enum Slot {
    Text(String),
    Tag {
        kind: TagKind,
        attributes: Attributes,
        children: Vec<usize>,
    },
}

/// The stack machine state.
struct TreeBuilder<'t> {
    table: &'t TagTable,
    slots: Vec<Slot>,
    /// Open frames below `last`, innermost on top.
    stack: Vec<usize>,
    /// The frame currently receiving children.
    last: usize,
}

impl<'t> TreeBuilder<'t> {
    fn new(table: &'t TagTable) -> Self {
        Self {
            table,
            slots: vec![Slot::Tag {
                kind: TagKind::Line,
                attributes: Attributes::new(),
                children: Vec::new(),
            }],
            stack: Vec::new(),
            last: ROOT,
        }
    }

    fn process_token(&mut self, token: Token<'_>) {
        match token {
            Token::Text(text) => {
                self.append(Slot::Text(text.to_string()));
            }
            Token::Malformed(tag) => {
                log::trace!("dropping malformed tag {:?} at {:?}", tag.name, tag.span);
            }
            Token::SelfClose(tag) => {
                if let Some((kind, attributes)) = self.resolve(&tag) {
                    self.append(Slot::Tag {
                        kind,
                        attributes,
                        children: Vec::new(),
                    });
                }
            }
            Token::Close(tag) => {
                if let Some(kind) = self.table.resolve(tag.name) {
                    self.close(kind, &tag);
                } else {
                    log::trace!("dropping unknown close tag {:?}", tag.name);
                }
            }
            Token::Open(tag) => {
                if let Some((kind, attributes)) = self.resolve(&tag) {
                    let id = self.append(Slot::Tag {
                        kind,
                        attributes,
                        children: Vec::new(),
                    });
                    self.stack.push(self.last);
                    self.last = id;
                }
            }
        }
    }

    /// Look up the tag's kind and read its attributes.
    fn resolve(&self, tag: &TagToken<'_>) -> Option<(TagKind, Attributes)> {
        match self.table.resolve(tag.name) {
            Some(kind) => Some((kind, parse_attributes(tag.content))),
            None => {
                log::trace!("dropping unknown tag {:?} at {:?}", tag.name, tag.span);
                None
            }
        }
    }

    /// Close the current frame if it is a non-root frame of `kind`.
    fn close(&mut self, kind: TagKind, tag: &TagToken<'_>) {
        if self.stack.is_empty() || self.kind_of(self.last) != Some(kind) {
            log::trace!(
                "ignoring close tag {:?} at {:?}: innermost frame is {:?}",
                tag.name,
                tag.span,
                self.kind_of(self.last)
            );
            return;
        }
        if let Some(parent) = self.stack.pop() {
            self.last = parent;
        }
    }

    fn kind_of(&self, id: usize) -> Option<TagKind> {
        match &self.slots[id] {
            Slot::Tag { kind, .. } => Some(*kind),
            Slot::Text(_) => None,
        }
    }

    /// Store a slot and attach it to the current frame.
    fn append(&mut self, slot: Slot) -> usize {
        let id = self.slots.len();
        self.slots.push(slot);
        if let Slot::Tag { children, .. } = &mut self.slots[self.last] {
            children.push(id);
        }
        id
    }

    /// Convert the arena into owned nodes and return the root's children.
    ///
    /// Children always have larger indices than their parent, so walking the
    /// arena backwards finishes every child before its parent is assembled.
    fn finish(self) -> Vec<Node> {
        if !self.stack.is_empty() {
            log::debug!(
                "end of input with {} unclosed frame(s), innermost {:?}",
                self.stack.len(),
                self.kind_of(self.last)
            );
        }

        let mut built: Vec<Option<Node>> = Vec::with_capacity(self.slots.len());
        built.resize_with(self.slots.len(), || None);

        let mut root_children = Vec::new();
        for (id, slot) in self.slots.into_iter().enumerate().rev() {
            match slot {
                Slot::Text(text) => built[id] = Some(Node::Text(TextNode { text })),
                Slot::Tag {
                    kind,
                    attributes,
                    children,
                } => {
                    let children: Vec<Node> = children
                        .into_iter()
                        .filter_map(|child| built[child].take())
                        .collect();
                    if id == ROOT {
                        root_children = children;
                    } else {
                        built[id] = Some(Node::Tag(TagNode {
                            kind,
                            attributes,
                            children,
                        }));
                    }
                }
            }
        }
        root_children
    }
}

/// Parses markup with a specific tag table.
///
/// ```
/// use markup::{MarkupParser, Node, TagKind, TagTable};
///
/// let table = TagTable::builder().alias("strong", TagKind::Bold).unwrap().build();
/// let nodes = MarkupParser::new(&table).parse("[strong]hi[/strong]");
/// assert_eq!(nodes, vec![Node::tag(TagKind::Bold, vec![Node::text("hi")])]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MarkupParser<'t> {
    table: &'t TagTable,
}

impl<'t> MarkupParser<'t> {
    pub fn new(table: &'t TagTable) -> Self {
        Self { table }
    }

    /// Parse markup into the children of an implicit root line.
    pub fn parse(&self, input: &str) -> Vec<Node> {
        let mut builder = TreeBuilder::new(self.table);
        for token in Lexer::new(input) {
            builder.process_token(token);
        }
        builder.finish()
    }
}

impl Default for MarkupParser<'static> {
    fn default() -> Self {
        Self::new(TagTable::global())
    }
}

/// Parses markup with the default tag table.
///
/// This is the main entry point for parsing markup text. It never fails:
/// unknown tags and stray close tags are dropped, and unclosed tags stay open.
///
/// # Examples
///
/// ```
/// use markup::parser::parse;
/// use markup::{Node, TagKind};
///
/// let nodes = parse("[b]Hello[/b] World");
/// assert_eq!(
///     nodes,
///     vec![
///         Node::tag(TagKind::Bold, vec![Node::text("Hello")]),
///         Node::text(" World"),
///     ]
/// );
/// ```
pub fn parse(input: &str) -> Vec<Node> {
    MarkupParser::default().parse(input)
}
