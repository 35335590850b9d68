//! Error types for tag vocabulary configuration.
//!
//! Parsing and serializing never fail; malformed markup degrades into a
//! well-typed tree instead. The only fallible surface is building a custom
//! [`TagTable`](crate::tag::TagTable).

use thiserror::Error;

use crate::tag::TagKind;

/// Errors that can occur when configuring a tag table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagTableError {
    /// Tag name is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid tag name: {0:?}")]
    InvalidName(String),

    /// Tag name is already bound to another kind.
    #[error("tag name {name:?} is bound to {existing:?}, cannot rebind to {requested:?}")]
    NameConflict {
        name: String,
        existing: TagKind,
        requested: TagKind,
    },
}
