//! Core data types for resources, tags and libraries
//!
//! These types mirror the JSON shapes exchanged with the UI and with exported
//! library files, so field names serialize in camelCase (`pathOrUrl`,
//! `createdAt`, `titleColor`, ...).
//!
//! # Types
//!
//! - **`Resource`**: A single catalogued item (file, folder, URL, cloud link, note)
//! - **`Tag`**: A label attached to resources by id
//! - **`Library`**: A named collection of resources and tags with an audit history
//! - **`PartialLibrary`**: Loosely-shaped source data accepted by the merge

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Reserved id of the system default tag
pub const DEFAULT_TAG_ID: &str = "system-default-tag";

/// Display name of the synthesized default tag
pub const DEFAULT_TAG_NAME: &str = "Default";

/// Background color backfilled on resources that carry none
pub const DEFAULT_RESOURCE_COLOR: &str = "#ffffff";

/// Title color backfilled on resources that carry none
pub const DEFAULT_TITLE_COLOR: &str = "#000000";

/// Extension reported for local files whose path has no `.`
pub const NO_EXTENSION: &str = "(none)";

/// Current time in milliseconds since the Unix epoch
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Mint a fresh opaque identifier
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Kind of a catalogued resource
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    /// A file on the local filesystem
    LocalFile,
    /// A folder on the local filesystem
    LocalFolder,
    /// A web address
    Url,
    /// A link into a cloud drive
    Cloud,
    /// Free-form note text stored in `path_or_url`
    TextNote,
    #[default]
    Other,
}

impl ResourceType {
    /// All resource types in declaration order
    pub const ALL: [Self; 6] = [
        Self::LocalFile,
        Self::LocalFolder,
        Self::Url,
        Self::Cloud,
        Self::TextNote,
        Self::Other,
    ];

    /// The wire name of this type (`local-file`, `url`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalFile => "local-file",
            Self::LocalFolder => "local-folder",
            Self::Url => "url",
            Self::Cloud => "cloud",
            Self::TextNote => "text-note",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown resource type '{s}'"))
    }
}

/// How a tag chip is drawn; carried through untouched by the core logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TagDisplayMode {
    #[default]
    All,
    IconOnly,
    TextOnly,
    ColorOnly,
}

/// A single catalogued item
///
/// Every field is defaulted on deserialization so hand-written
/// import data with missing fields still parses; the merge decides what to do
/// with incomplete entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub path_or_url: String,
    /// Tag ids, in display order
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub last_accessed_at: i64,
}

impl Resource {
    /// Create a resource with a fresh id, tagged with the default tag
    #[must_use]
    pub fn new(title: impl Into<String>, resource_type: ResourceType, path_or_url: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: new_id(),
            title: title.into(),
            resource_type,
            path_or_url: path_or_url.into(),
            tags: vec![DEFAULT_TAG_ID.to_string()],
            color: Some(DEFAULT_RESOURCE_COLOR.to_string()),
            title_color: Some(DEFAULT_TITLE_COLOR.to_string()),
            notes: None,
            created_at: now,
            updated_at: now,
            last_accessed_at: 0,
        }
    }

    /// Whether the resource carries the given tag id
    #[must_use]
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t == tag_id)
    }

    /// Extension of the resource's path, see [`extension_of`]
    #[must_use]
    pub fn extension(&self) -> String {
        extension_of(&self.path_or_url)
    }

    /// Restore the at-least-one-tag invariant
    pub(crate) fn ensure_tagged(&mut self) {
        if self.tags.is_empty() {
            self.tags.push(DEFAULT_TAG_ID.to_string());
        }
    }
}

/// Lower-cased extension of a path including the leading dot (`.png`)
///
/// Returns [`NO_EXTENSION`] for empty paths and paths without a `.`.
///
/// # Examples
/// ```
/// # use resnav::model::{extension_of, NO_EXTENSION};
/// assert_eq!(extension_of("docs/Logo.PNG"), ".png");
/// assert_eq!(extension_of("Makefile"), NO_EXTENSION);
/// ```
#[must_use]
pub fn extension_of(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext.to_lowercase()),
        None => NO_EXTENSION.to_string(),
    }
}

/// A label attached to resources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_icon: Option<String>,
    #[serde(default)]
    pub display_mode: TagDisplayMode,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

impl Tag {
    /// Create a user tag with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            color: color.into(),
            icon: Some("fa-tag".to_string()),
            custom_icon: None,
            display_mode: TagDisplayMode::All,
            is_default: false,
        }
    }

    /// The reserved system tag, synthesized on every read path
    #[must_use]
    pub fn system_default() -> Self {
        Self {
            id: DEFAULT_TAG_ID.to_string(),
            name: DEFAULT_TAG_NAME.to_string(),
            color: "#94a3b8".to_string(),
            icon: Some("fa-folder".to_string()),
            custom_icon: None,
            display_mode: TagDisplayMode::All,
            is_default: true,
        }
    }

    /// Whether this is the reserved default tag
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.id == DEFAULT_TAG_ID
    }

    /// Case-insensitive name comparison used for reconciliation
    #[must_use]
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

/// Remove the reserved default tag from a tag list (write path)
pub fn strip_default_tag(tags: &mut Vec<Tag>) {
    tags.retain(|t| !t.is_reserved());
}

/// Statistics attached to a history entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<BTreeMap<String, usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filenames: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// One entry of a library's audit log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: i64,
    pub action: String,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AuditMetadata>,
}

/// A named collection of resources and tags
///
/// In stored form `tags` never contains the reserved default tag; use
/// [`Library::tags_with_default`] on read paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    /// Newest entry first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Source data for a merge: any subset of a library's fields
///
/// Corresponds to data pasted or loaded from outside the application; the
/// merge only looks at `tags` and `resources`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialLibrary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

impl From<Library> for PartialLibrary {
    fn from(library: Library) -> Self {
        Self {
            id: Some(library.id),
            name: Some(library.name),
            resources: Some(library.resources),
            tags: Some(library.tags),
            created_at: Some(library.created_at),
            updated_at: Some(library.updated_at),
            history: Some(library.history),
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
