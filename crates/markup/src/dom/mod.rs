//! In-memory presentation tree.
//!
//! [`Fragment`] is a small arena-backed element/text tree implementing
//! [`PresentationTree`]. It stands in for an editable document surface so the
//! serializer can run without a browser, and is what the command-line tool
//! builds from HTML input.

mod html;

use crate::serialize::{NodeKind, PresentationTree};

/// Handle to a node in a [`Fragment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Payload of a fragment node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    /// An element, with its lower-case tag name.
    Element(String),
    Text(String),
}

#[derive(Clone, Debug)]
struct DomNode {
    data: NodeData,
    children: Vec<NodeId>,
}

/// An element/text tree under an implicit `div` root.
///
/// Removed nodes stay in the arena but are no longer reachable from the root.
#[derive(Clone, Debug)]
pub struct Fragment {
    nodes: Vec<DomNode>,
}

impl Fragment {
    const ROOT: NodeId = NodeId(0);

    /// Create an empty fragment.
    pub fn new() -> Self {
        Self {
            nodes: vec![DomNode {
                data: NodeData::Element("div".to_string()),
                children: Vec::new(),
            }],
        }
    }

    /// Build a fragment from an HTML snippet, parsed as the content of a `div`.
    ///
    /// Never fails: malformed markup is repaired the way a browser would.
    pub fn from_html(html: &str) -> Self {
        html::parse_html(html)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DomNode {
            data,
            children: Vec::new(),
        });
        id
    }

    /// Append a new element under `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.push(NodeData::Element(name.to_ascii_lowercase()));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append a new text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.push(NodeData::Text(text.into()));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Write the root's children back out as HTML.
    pub fn to_html(&self) -> String {
        html::write_html(self)
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationTree for Fragment {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn kind(&self, node: NodeId) -> NodeKind<'_> {
        match &self.nodes[node.0].data {
            NodeData::Element(name) => NodeKind::Element(name),
            NodeData::Text(text) => NodeKind::Text(text),
        }
    }

    fn set_text(&mut self, node: NodeId, text: String) {
        if let NodeData::Text(current) = &mut self.nodes[node.0].data {
            *current = text;
        }
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.retain(|id| *id != child);
    }

    fn replace_with_text(&mut self, parent: NodeId, child: NodeId, text: String) {
        let id = self.push(NodeData::Text(text));
        if let Some(slot) = self.nodes[parent.0]
            .children
            .iter_mut()
            .find(|slot| **slot == child)
        {
            *slot = id;
        }
    }
}
