//! Bracket-tag markup for rich chat messages.
//!
//! This crate converts between a compact markup language and a tree of typed
//! nodes, in both directions.
//!
//! # Overview
//!
//! Markup uses square-bracket tags:
//!
//! - `[b]text[/b]` - Bold (also `[bold]`)
//! - `[i]text[/i]`, `[u]text[/u]` - Italic, underline
//! - `[line]text[/line]` - Generic line container
//! - `[br/]` - Line break
//! - `[square-bracket/]`, `[square-bracket-end/]` - Literal `[` and `]`
//! - `[line color="red"]...[/line]` - Attributes as `name="value"` pairs
//!
//! Parsing never fails. Unknown tags and close tags that do not match the
//! innermost open tag are dropped; tags left open at the end of input stay
//! open.
//!
//! Serializing walks a [`PresentationTree`] (for example an editor surface,
//! or the in-memory [`dom::Fragment`]) and writes it out as markup, escaping
//! literal brackets so they read back as text.
//!
//! # Usage
//!
//! ```
//! use markup::dom::Fragment;
//! use markup::{parse, plain_text, serialize, Node, TagKind};
//!
//! let nodes = parse("[b]Hello[/b] [i]World[/i]");
//! assert_eq!(plain_text(&nodes), "Hello World");
//! assert_eq!(nodes[0], Node::tag(TagKind::Bold, vec![Node::text("Hello")]));
//!
//! let mut fragment = Fragment::from_html("<strong>a [b]</strong>");
//! let markup = serialize(&mut fragment);
//! assert_eq!(markup, "[b]a [square-bracket/]b[square-bracket-end/][/b]");
//! assert_eq!(plain_text(&parse(&markup)), "a [b]");
//! ```

pub mod dom;
pub mod error;
pub mod node;
pub mod parser;
pub mod serialize;
pub mod tag;
pub mod writer;

// Re-export main types at crate root
pub use error::TagTableError;
pub use node::{Attributes, Node, TagNode, TextNode, outline, plain_text, render_markup};
pub use parser::{MarkupParser, parse};
pub use serialize::{MarkupSerializer, NodeKind, PresentationTree, serialize};
pub use tag::{TagKind, TagTable, TagTableBuilder};
pub use writer::{write_plain_tag, write_tag};
