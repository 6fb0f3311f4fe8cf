//! Direct-manipulation operations on a [`Library`]
//!
//! Every operation keeps the library invariants intact:
//! - stored `tags` never contain the reserved default tag
//! - every resource carries at least one tag id
//! - each edit is recorded in `history`, newest first (access stamps are not)

use super::error::LibraryError;
use super::types::{
    AuditMetadata, DEFAULT_TAG_ID, Library, Resource, ResourceType, Tag, new_id, now_millis,
    strip_default_tag,
};
use crate::audit::{self, actions};
use crate::import::{UNTITLED_LIBRARY, filter_duplicate_resources};
use std::collections::BTreeSet;

impl Library {
    /// Create an empty library with a creation entry in its history
    ///
    /// The name is trimmed; a blank name becomes [`UNTITLED_LIBRARY`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = match name.trim() {
            "" => UNTITLED_LIBRARY.to_string(),
            trimmed => trimmed.to_string(),
        };
        let now = now_millis();
        let entry = audit::create_entry_at(
            actions::LIBRARY_CREATED,
            format!("Library \"{name}\" created empty"),
            None,
            now,
        );
        Self {
            id: new_id(),
            name,
            resources: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            history: vec![entry],
        }
    }

    /// Tags as presented to readers: the default tag first, then stored tags
    #[must_use]
    pub fn tags_with_default(&self) -> Vec<Tag> {
        if self.tags.iter().any(Tag::is_reserved) {
            return self.tags.clone();
        }
        let mut tags = Vec::with_capacity(self.tags.len() + 1);
        tags.push(Tag::system_default());
        tags.extend(self.tags.iter().cloned());
        tags
    }

    /// The library in its persisted form, without the default tag
    #[must_use]
    pub fn into_stored(mut self) -> Self {
        strip_default_tag(&mut self.tags);
        self
    }

    /// Look up a resource by id
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Record that a resource was opened
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ResourceNotFound` if no resource has this id.
    pub fn mark_accessed(&mut self, id: &str) -> Result<(), LibraryError> {
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| LibraryError::ResourceNotFound(id.to_string()))?;
        resource.last_accessed_at = now_millis();
        Ok(())
    }

    /// Look up a tag by id, including the synthesized default tag
    #[must_use]
    pub fn tag(&self, id: &str) -> Option<Tag> {
        if id == DEFAULT_TAG_ID {
            return Some(Tag::system_default());
        }
        self.tags.iter().find(|t| t.id == id).cloned()
    }

    /// Rename the library, trimming the new name
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BlankName` if the name is empty after trimming.
    pub fn rename(&mut self, name: &str) -> Result<(), LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::BlankName);
        }
        self.name = name.to_string();
        self.touch(actions::LIBRARY_RENAMED, format!("New name: {name}"), None);
        Ok(())
    }

    /// Insert a new resource or replace an existing one with the same id
    ///
    /// New resources go to the front of the list. Returns `true` when the
    /// resource was newly added.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BlankTitle` if the title is empty after trimming.
    pub fn save_resource(&mut self, mut resource: Resource) -> Result<bool, LibraryError> {
        if resource.title.trim().is_empty() {
            return Err(LibraryError::BlankTitle);
        }

        resource.updated_at = now_millis();
        resource.ensure_tagged();

        let metadata = audit::analyze_resources(std::slice::from_ref(&resource));
        let details = format!("Name: {}", resource.title);

        let is_new = match self.resources.iter_mut().find(|r| r.id == resource.id) {
            Some(existing) => {
                *existing = resource;
                false
            }
            None => {
                self.resources.insert(0, resource);
                true
            }
        };

        let action = if is_new { actions::RESOURCE_ADDED } else { actions::RESOURCE_UPDATED };
        self.touch(action, details, Some(metadata));
        Ok(is_new)
    }

    /// Remove the resources with the given ids, returning how many were removed
    pub fn delete_resources(&mut self, ids: &[String]) -> usize {
        let (removed, kept): (Vec<Resource>, Vec<Resource>) = std::mem::take(&mut self.resources)
            .into_iter()
            .partition(|r| ids.contains(&r.id));
        self.resources = kept;

        if !removed.is_empty() {
            let metadata = audit::analyze_resources(&removed);
            self.touch(
                actions::BATCH_DELETE,
                format!("Deleted {} resource(s)", removed.len()),
                Some(metadata),
            );
        }
        removed.len()
    }

    /// Add tag ids to the selected resources, keeping existing order
    ///
    /// Returns the number of resources touched.
    pub fn add_tags(&mut self, ids: &[String], tag_ids: &[String]) -> usize {
        if tag_ids.is_empty() {
            return 0;
        }

        let now = now_millis();
        let mut touched = 0;
        for resource in self.resources.iter_mut().filter(|r| ids.contains(&r.id)) {
            for tag_id in tag_ids {
                if !resource.has_tag(tag_id) {
                    resource.tags.push(tag_id.clone());
                }
            }
            resource.updated_at = now;
            touched += 1;
        }

        if touched > 0 {
            self.touch(
                actions::BATCH_TAG_ADD,
                format!("Tagged {touched} resource(s)"),
                Some(tag_metadata(touched, tag_ids)),
            );
        }
        touched
    }

    /// Remove tag ids from the selected resources
    ///
    /// A resource left without tags falls back to the default tag. Returns the
    /// number of resources touched.
    pub fn remove_tags(&mut self, ids: &[String], tag_ids: &[String]) -> usize {
        if tag_ids.is_empty() {
            return 0;
        }

        let now = now_millis();
        let mut touched = 0;
        for resource in self.resources.iter_mut().filter(|r| ids.contains(&r.id)) {
            resource.tags.retain(|t| !tag_ids.contains(t));
            resource.ensure_tagged();
            resource.updated_at = now;
            touched += 1;
        }

        if touched > 0 {
            self.touch(
                actions::BATCH_TAG_REMOVE,
                format!("Untagged {touched} resource(s)"),
                Some(tag_metadata(touched, tag_ids)),
            );
        }
        touched
    }

    /// Add a user tag to the library
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ReservedTag` if the tag uses the reserved id.
    pub fn add_tag(&mut self, tag: Tag) -> Result<(), LibraryError> {
        if tag.is_reserved() {
            return Err(LibraryError::ReservedTag(tag.id));
        }
        let details = format!("Name: {}", tag.name);
        self.tags.push(tag);
        self.touch(actions::TAG_CREATED, details, None);
        Ok(())
    }

    /// Rename a user tag
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ReservedTag` for the default tag and
    /// `LibraryError::TagNotFound` if no such tag is stored.
    pub fn rename_tag(&mut self, tag_id: &str, name: impl Into<String>) -> Result<(), LibraryError> {
        if tag_id == DEFAULT_TAG_ID {
            return Err(LibraryError::ReservedTag(tag_id.to_string()));
        }
        let tag = self
            .tags
            .iter_mut()
            .find(|t| t.id == tag_id)
            .ok_or_else(|| LibraryError::TagNotFound(tag_id.to_string()))?;
        let previous = std::mem::replace(&mut tag.name, name.into());
        let details = format!("Renamed \"{previous}\" to \"{}\"", tag.name);
        self.touch(actions::TAG_RENAMED, details, Some(tag_metadata(1, &[tag_id.to_string()])));
        Ok(())
    }

    /// Delete user tags and detach them from every resource
    ///
    /// Resources left without tags fall back to the default tag. Returns the
    /// number of tags removed.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::ReservedTag` if the default tag is among `tag_ids`.
    pub fn delete_tags(&mut self, tag_ids: &[String]) -> Result<usize, LibraryError> {
        if let Some(reserved) = tag_ids.iter().find(|id| *id == DEFAULT_TAG_ID) {
            return Err(LibraryError::ReservedTag(reserved.clone()));
        }

        let before = self.tags.len();
        self.tags.retain(|t| !tag_ids.contains(&t.id));
        let removed = before - self.tags.len();

        for resource in &mut self.resources {
            if resource.tags.iter().any(|t| tag_ids.contains(t)) {
                resource.tags.retain(|t| !tag_ids.contains(t));
                resource.ensure_tagged();
            }
        }

        if removed > 0 {
            self.touch(
                actions::TAGS_DELETED,
                format!("Deleted {removed} tag(s)"),
                Some(tag_metadata(removed, tag_ids)),
            );
        }
        Ok(removed)
    }

    /// Distinct, sorted extensions of local files with a non-empty path
    #[must_use]
    pub fn available_extensions(&self) -> Vec<String> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == ResourceType::LocalFile && !r.path_or_url.is_empty())
            .map(Resource::extension)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Append imported resources and any tags the import created
    ///
    /// Incoming resources identical to an existing one on title, type and path
    /// are skipped. Returns the number of resources added.
    pub fn append_imported(&mut self, resources: Vec<Resource>, new_tags: Vec<Tag>, action: &str) -> usize {
        for tag in new_tags.into_iter().filter(|t| !t.is_reserved()) {
            self.tags.push(tag);
        }

        let outcome = filter_duplicate_resources(&self.resources, resources);
        let added = outcome.added.len();
        let metadata = audit::analyze_resources(&outcome.added);
        self.resources = outcome.resources;
        self.touch(action, format!("Imported {added} new resource(s)"), Some(metadata));
        added
    }

    fn touch(&mut self, action: &str, details: String, metadata: Option<AuditMetadata>) {
        let now = now_millis();
        self.updated_at = now;
        self.history.insert(0, audit::create_entry_at(action, details, metadata, now));
    }
}

fn tag_metadata(count: usize, tag_ids: &[String]) -> AuditMetadata {
    AuditMetadata {
        count: Some(count),
        tags: Some(tag_ids.to_vec()),
        ..AuditMetadata::default()
    }
}
