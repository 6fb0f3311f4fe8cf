//! Resource, tag and library data model
//!
//! Holds the JSON-compatible data types plus the library editing operations.
//! The reserved default tag is never stored: it is synthesized on read with
//! [`Library::tags_with_default`] and stripped on write with
//! [`strip_default_tag`] / [`Library::into_stored`].

pub mod error;
mod library;
pub mod types;

pub use error::LibraryError;
pub use types::{
    AuditMetadata, DEFAULT_RESOURCE_COLOR, DEFAULT_TAG_ID, DEFAULT_TAG_NAME, DEFAULT_TITLE_COLOR,
    HistoryEntry, Library, NO_EXTENSION, PartialLibrary, Resource, ResourceType, Tag,
    TagDisplayMode, extension_of, new_id, now_millis, strip_default_tag,
};
