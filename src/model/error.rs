//! Library editing error types
//!
//! The pure engines (tree, filter, merge) never fail. These errors cover the
//! direct-manipulation operations on a [`Library`](super::Library), where the
//! caller asked for something the library invariants forbid.

use thiserror::Error;

/// Errors raised by library edit operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    /// A resource was saved with an empty or whitespace-only title
    #[error("Resource title cannot be blank")]
    BlankTitle,

    /// A library was renamed to an empty or whitespace-only name
    #[error("Library name cannot be blank")]
    BlankName,

    /// No resource with the given id exists in the library
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// No tag with the given id exists in the library
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// The reserved default tag cannot be stored, renamed or deleted
    #[error("Tag '{0}' is reserved by the system")]
    ReservedTag(String),
}
