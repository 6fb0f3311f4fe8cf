//! Library merge and reconciliation
//!
//! Folds a source collection of tags and resources (another library, or
//! externally produced JSON) into a target library and returns a new library
//! value. The target is never modified.
//!
//! # Reconciliation rules
//!
//! - **Tags** are matched by name, case-insensitively. A source tag whose name
//!   already exists maps onto the existing tag's id; otherwise it is copied
//!   under a freshly minted id. The reserved default tag always maps to itself.
//! - **Resources** are duplicates when an accumulated resource has the same
//!   type and `path_or_url`; duplicates and resources without a path are
//!   skipped. Kept resources get a new id and their tag ids are remapped
//!   through the tag mapping. Ids with no mapping pass through unchanged.
//! - The result never stores the default tag and never holds an untagged
//!   resource.
//!
//! Merging the same source twice adds no resources the second time. Tag
//! matching is by name only, so renaming an existing tag between two merges
//! lets the second merge create a tag under the old name again.
//!
//! If the target already holds several tags whose names differ only in case,
//! a matching source tag maps onto the first of them in list order and a
//! warning is logged; such data is assumed not to occur.

use crate::audit::{self, actions};
use crate::model::{
    DEFAULT_RESOURCE_COLOR, DEFAULT_TAG_ID, DEFAULT_TITLE_COLOR, Library, PartialLibrary, Resource,
    ResourceType, Tag, new_id, now_millis, strip_default_tag,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Outcome of a merge with the bookkeeping counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// The merged library
    pub library: Library,
    /// Resources added to the target
    pub added: usize,
    /// Source resources skipped as type+path duplicates
    pub duplicates: usize,
    /// Source resources skipped for lacking a path
    pub malformed: usize,
    /// Source tags copied in as new tags
    pub tags_created: usize,
    /// Source tags mapped onto an existing tag
    pub tags_reused: usize,
}

/// Merge `source` into `target`, stamping the current time
///
/// # Examples
/// ```
/// use resnav::merge::merge;
/// use resnav::model::{Library, PartialLibrary, Resource, ResourceType};
///
/// let target = Library::new("Main");
/// let source = PartialLibrary {
///     resources: Some(vec![Resource::new("Home", ResourceType::Url, "https://x.com")]),
///     ..PartialLibrary::default()
/// };
///
/// let merged = merge(&target, &source);
/// assert_eq!(merged.resources.len(), 1);
/// assert!(target.resources.is_empty());
/// ```
#[must_use]
pub fn merge(target: &Library, source: &PartialLibrary) -> Library {
    merge_at(target, source, now_millis()).library
}

/// Merge `source` into `target` using `now` as the merge time
#[must_use]
pub fn merge_at(target: &Library, source: &PartialLibrary, now: i64) -> MergeReport {
    let mut tags = target.tags.clone();
    let mut tag_map: HashMap<String, String> = HashMap::new();
    let mut tags_created = 0;
    let mut tags_reused = 0;

    for source_tag in source.tags.iter().flatten() {
        if source_tag.is_reserved() {
            tag_map.insert(source_tag.id.clone(), DEFAULT_TAG_ID.to_string());
            continue;
        }

        if let Some(existing_id) = find_tag_by_name(&tags, &source_tag.name) {
            tag_map.insert(source_tag.id.clone(), existing_id);
            tags_reused += 1;
        } else {
            let id = new_id();
            tag_map.insert(source_tag.id.clone(), id.clone());
            tags.push(Tag {
                id,
                ..source_tag.clone()
            });
            tags_created += 1;
        }
    }

    let mut resources = target.resources.clone();
    let mut seen: HashSet<(ResourceType, String)> = resources
        .iter()
        .map(|r| (r.resource_type, r.path_or_url.clone()))
        .collect();
    let mut added: Vec<Resource> = Vec::new();
    let mut duplicates = 0;
    let mut malformed = 0;

    for source_res in source.resources.iter().flatten() {
        if source_res.path_or_url.is_empty() {
            malformed += 1;
            continue;
        }

        if !seen.insert((source_res.resource_type, source_res.path_or_url.clone())) {
            duplicates += 1;
            continue;
        }

        let resource = adopt_resource(source_res, &tag_map, now);
        added.push(resource.clone());
        resources.push(resource);
    }

    strip_default_tag(&mut tags);

    let mut metadata = audit::analyze_resources(&added);
    metadata.filenames = None;
    let entry = audit::create_entry_at(
        actions::MERGE,
        format!("Merged {} new resource(s) via import.", added.len()),
        Some(metadata),
        now,
    );
    let mut history = Vec::with_capacity(target.history.len() + 1);
    history.push(entry);
    history.extend(target.history.iter().cloned());

    info!(
        library = %target.name,
        added = added.len(),
        duplicates,
        malformed,
        tags_created,
        tags_reused,
        "merged into library"
    );

    MergeReport {
        library: Library {
            tags,
            resources,
            updated_at: now,
            history,
            ..target.clone()
        },
        added: added.len(),
        duplicates,
        malformed,
        tags_created,
        tags_reused,
    }
}

/// Id of the first tag whose name matches case-insensitively
fn find_tag_by_name(tags: &[Tag], name: &str) -> Option<String> {
    let mut matches = tags.iter().filter(|t| t.same_name(name));
    let first = matches.next()?;
    if matches.next().is_some() {
        warn!(name, chosen = %first.id, "several existing tags share this name, mapping onto the first");
    }
    Some(first.id.clone())
}

/// Copy a source resource into the target's id space
fn adopt_resource(source: &Resource, tag_map: &HashMap<String, String>, now: i64) -> Resource {
    let mut tags: Vec<String> = source
        .tags
        .iter()
        .map(|id| tag_map.get(id).cloned().unwrap_or_else(|| id.clone()))
        .collect();
    if tags.is_empty() {
        tags.push(DEFAULT_TAG_ID.to_string());
    }

    let resource = Resource {
        id: new_id(),
        tags,
        color: Some(non_empty_or(source.color.as_deref(), DEFAULT_RESOURCE_COLOR)),
        title_color: Some(non_empty_or(source.title_color.as_deref(), DEFAULT_TITLE_COLOR)),
        updated_at: now,
        ..source.clone()
    };
    debug!(source_id = %source.id, id = %resource.id, "adopted resource");
    resource
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
