//! Audit log helpers
//!
//! Builds [`HistoryEntry`] values and the statistics attached to them. The
//! entries themselves are stored newest-first on [`Library::history`].
//!
//! [`Library::history`]: crate::model::Library::history

use crate::model::{AuditMetadata, HistoryEntry, Resource, new_id, now_millis};
use std::collections::BTreeMap;

/// Maximum number of titles recorded in [`AuditMetadata::filenames`]
pub const MAX_RECORDED_TITLES: usize = 20;

/// Title recorded for resources whose title is blank
pub const UNTITLED_RESOURCE: &str = "Untitled resource";

/// Action names written by the library operations
pub mod actions {
    pub const LIBRARY_CREATED: &str = "Library created";
    pub const LIBRARY_IMPORTED: &str = "Library imported";
    pub const LIBRARY_RENAMED: &str = "Library renamed";
    pub const RESOURCE_ADDED: &str = "Resource added";
    pub const RESOURCE_UPDATED: &str = "Resource updated";
    pub const BATCH_DELETE: &str = "Batch delete";
    pub const BATCH_TAG_ADD: &str = "Batch tag add";
    pub const BATCH_TAG_REMOVE: &str = "Batch tag remove";
    pub const TAG_CREATED: &str = "Tag created";
    pub const TAG_RENAMED: &str = "Tag renamed";
    pub const TAGS_DELETED: &str = "Tags deleted";
    pub const MERGE: &str = "Merge";
    pub const FILE_IMPORT: &str = "File import";
    pub const TEXT_IMPORT: &str = "Text import";
}

/// Create a history entry stamped with the current time
#[must_use]
pub fn create_entry(action: &str, details: impl Into<String>, metadata: Option<AuditMetadata>) -> HistoryEntry {
    create_entry_at(action, details, metadata, now_millis())
}

/// Create a history entry with an explicit timestamp
#[must_use]
pub fn create_entry_at(
    action: &str,
    details: impl Into<String>,
    metadata: Option<AuditMetadata>,
    timestamp: i64,
) -> HistoryEntry {
    HistoryEntry {
        id: new_id(),
        timestamp,
        action: action.to_string(),
        details: details.into(),
        metadata,
    }
}

/// Summarize a set of resources for an audit entry
///
/// Records the total, a count per resource type and the first
/// [`MAX_RECORDED_TITLES`] titles.
#[must_use]
pub fn analyze_resources(resources: &[Resource]) -> AuditMetadata {
    let mut types: BTreeMap<String, usize> = BTreeMap::new();
    for resource in resources {
        *types.entry(resource.resource_type.to_string()).or_default() += 1;
    }

    let filenames = resources
        .iter()
        .take(MAX_RECORDED_TITLES)
        .map(|r| {
            if r.title.trim().is_empty() {
                UNTITLED_RESOURCE.to_string()
            } else {
                r.title.clone()
            }
        })
        .collect();

    AuditMetadata {
        count: Some(resources.len()),
        types: Some(types),
        filenames: Some(filenames),
        tags: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;

    #[test]
    fn test_create_entry_fields() {
        let entry = create_entry_at(actions::MERGE, "details", None, 42);
        assert_eq!(entry.action, "Merge");
        assert_eq!(entry.details, "details");
        assert_eq!(entry.timestamp, 42);
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_create_entry_uses_current_time() {
        let before = now_millis();
        let entry = create_entry(actions::TAG_CREATED, "Name: Work", None);
        assert!(entry.timestamp >= before);
        assert!(entry.metadata.is_none());
    }

    #[test]
    fn test_analyze_counts_types() {
        let resources = vec![
            Resource::new("a", ResourceType::Url, "https://a.com"),
            Resource::new("b", ResourceType::Url, "https://b.com"),
            Resource::new("c", ResourceType::LocalFile, "/tmp/c.txt"),
        ];

        let meta = analyze_resources(&resources);
        assert_eq!(meta.count, Some(3));
        let types = meta.types.unwrap();
        assert_eq!(types.get("url"), Some(&2));
        assert_eq!(types.get("local-file"), Some(&1));
    }

    #[test]
    fn test_analyze_caps_titles_and_names_blank() {
        let mut resources: Vec<Resource> = (0..25)
            .map(|i| Resource::new(format!("r{i}"), ResourceType::Other, format!("p{i}")))
            .collect();
        resources[0].title = "  ".to_string();

        let meta = analyze_resources(&resources);
        let names = meta.filenames.unwrap();
        assert_eq!(names.len(), MAX_RECORDED_TITLES);
        assert_eq!(names[0], UNTITLED_RESOURCE);
        assert_eq!(names[1], "r1");
    }

    #[test]
    fn test_analyze_empty() {
        let meta = analyze_resources(&[]);
        assert_eq!(meta.count, Some(0));
        assert!(meta.filenames.unwrap().is_empty());
    }
}
