//! Parser for chat markup.
//!
//! This module contains the lexer, attribute parser, and tree builder.

mod attr;
mod builder;
mod lexer;

pub use attr::parse_attributes;
pub use builder::{MarkupParser, parse};
pub use lexer::{Lexer, TagToken, Token};

pub(crate) use lexer::is_space;
