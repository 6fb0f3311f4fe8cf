//! Testing utilities for resnav
//!
//! Fixture builders with fixed ids and timestamps so assertions can compare
//! whole values.
//!
//! Only available when compiled with `cfg(test)`.

use crate::model::{DEFAULT_TAG_ID, Library, Resource, ResourceType, Tag, TagDisplayMode};

/// Build a resource with a fixed id whose title is the last path segment
#[must_use]
pub fn resource(id: &str, resource_type: ResourceType, path_or_url: &str) -> Resource {
    let title = path_or_url
        .rsplit(['/', '\\'])
        .find(|s| !s.is_empty())
        .unwrap_or(path_or_url)
        .to_string();

    Resource {
        id: id.to_string(),
        title,
        resource_type,
        path_or_url: path_or_url.to_string(),
        tags: vec![DEFAULT_TAG_ID.to_string()],
        color: None,
        title_color: None,
        notes: None,
        created_at: 1_000,
        updated_at: 1_000,
        last_accessed_at: 0,
    }
}

/// Build a local-file resource with explicit title and tags
#[must_use]
pub fn file(id: &str, title: &str, path: &str, tags: &[&str]) -> Resource {
    Resource {
        title: title.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
        ..resource(id, ResourceType::LocalFile, path)
    }
}

/// Build a user tag with a fixed id
#[must_use]
pub fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: name.to_string(),
        color: "#3b82f6".to_string(),
        icon: Some("fa-tag".to_string()),
        custom_icon: None,
        display_mode: TagDisplayMode::All,
        is_default: false,
    }
}

/// Build a library with fixed id and timestamps and an empty history
#[must_use]
pub fn library_with(resources: Vec<Resource>, tags: Vec<Tag>) -> Library {
    Library {
        id: "lib-1".to_string(),
        name: "Test library".to_string(),
        resources,
        tags,
        created_at: 500,
        updated_at: 500,
        history: Vec::new(),
    }
}

/// Ids of a resource slice, in order
#[must_use]
pub fn ids(resources: &[Resource]) -> Vec<&str> {
    resources.iter().map(|r| r.id.as_str()).collect()
}
