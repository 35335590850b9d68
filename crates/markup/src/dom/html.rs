//! HTML fragment reading and writing.
//!
//! Fragments are parsed the way a browser parses `innerHTML` assigned to a
//! `div`: implied end tags are inserted and misnested formatting elements are
//! repaired. Comments, doctypes and attributes do not survive into the
//! [`Fragment`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, ParseOpts, QualName, local_name, ns, parse_fragment, serialize};
use markup5ever_rcdom::{Handle, Node, NodeData as DomData, RcDom, SerializableHandle};

use super::{Fragment, NodeData, NodeId};
use crate::serialize::PresentationTree;

pub(super) fn parse_html(html: &str) -> Fragment {
    let dom = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("div")),
        Vec::new(),
        false,
    )
    .one(html);

    // Fragment content lands under a synthetic `html` element.
    let top: Vec<Handle> = dom
        .document
        .children
        .borrow()
        .first()
        .map(|html| html.children.borrow().clone())
        .unwrap_or_default();

    let mut fragment = Fragment::new();
    let mut pending: Vec<(Handle, NodeId)> =
        top.into_iter().rev().map(|handle| (handle, fragment.root())).collect();

    while let Some((handle, parent)) = pending.pop() {
        let id = match &handle.data {
            DomData::Element { name, .. } => fragment.append_element(parent, &name.local),
            DomData::Text { contents } => {
                fragment.append_text(parent, contents.borrow().to_string());
                continue;
            }
            _ => continue,
        };
        pending.extend(
            handle
                .children
                .borrow()
                .iter()
                .rev()
                .map(|child| (child.clone(), id)),
        );
    }

    fragment
}

pub(super) fn write_html(fragment: &Fragment) -> String {
    let container = create_element("div");
    let mut pending = vec![(fragment.root(), container.clone())];
    while let Some((id, handle)) = pending.pop() {
        for child in fragment.children(id) {
            let child_handle = match fragment.data(child) {
                NodeData::Element(name) => create_element(name),
                NodeData::Text(text) => create_text(text),
            };
            handle.children.borrow_mut().push(child_handle.clone());
            pending.push((child, child_handle));
        }
    }

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let mut output = Vec::new();
    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        if let Err(e) = serialize(&mut output, &serializable, opts.clone()) {
            log::debug!("HTML serialization failed: {e}");
        }
    }
    String::from_utf8_lossy(&output).into_owned()
}

fn create_element(tag: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: DomData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(Vec::new()),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: DomData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}
