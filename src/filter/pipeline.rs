//! Filter and sort pipeline producing the visible resource list
//!
//! Filtering is the conjunction of four predicates, checked in order and
//! short-circuiting:
//!
//! 1. text: query against title (and path when enabled)
//! 2. type: resource type among the selected types
//! 3. extension: only constrains `local-file` resources
//! 4. tags: AND/OR over the selected tag ids
//!
//! The pipeline never fails. A query that does not compile as a regular
//! expression degrades to a plain substring test.

use super::options::{FilterOptions, MatchMode, SortBy};
use crate::model::{Resource, ResourceType};
use crate::tree::compare_names;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

/// Compiled form of the text predicate
#[derive(Debug)]
enum TextMatcher {
    Any,
    Pattern { regex: Regex, include_path: bool },
    Substring { needle: String, case_sensitive: bool, include_path: bool },
}

impl TextMatcher {
    fn new(options: &FilterOptions) -> Self {
        let query = options.search_query.as_str();
        if query.is_empty() {
            return Self::Any;
        }

        let settings = options.settings;
        let substring = || Self::Substring {
            needle: if settings.filter_case_sensitive {
                query.to_string()
            } else {
                query.to_lowercase()
            },
            case_sensitive: settings.filter_case_sensitive,
            include_path: settings.filter_include_path,
        };

        if !options.regex_enabled {
            return substring();
        }

        match RegexBuilder::new(query)
            .case_insensitive(!settings.filter_case_sensitive)
            .build()
        {
            Ok(regex) => Self::Pattern {
                regex,
                include_path: settings.filter_include_path,
            },
            Err(e) => {
                warn!(query, error = %e, "invalid search pattern, falling back to substring match");
                substring()
            }
        }
    }

    fn matches(&self, resource: &Resource) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern { regex, include_path } => {
                regex.is_match(&resource.title) || (*include_path && regex.is_match(&resource.path_or_url))
            }
            Self::Substring {
                needle,
                case_sensitive,
                include_path,
            } => {
                let contains = |haystack: &str| {
                    if *case_sensitive {
                        haystack.contains(needle.as_str())
                    } else {
                        haystack.to_lowercase().contains(needle.as_str())
                    }
                };
                contains(&resource.title) || (*include_path && contains(&resource.path_or_url))
            }
        }
    }
}

fn matches_type(resource: &Resource, options: &FilterOptions) -> bool {
    options.selected_types.is_empty() || options.selected_types.contains(&resource.resource_type)
}

fn matches_extension(resource: &Resource, options: &FilterOptions) -> bool {
    if options.selected_extensions.is_empty() || resource.resource_type != ResourceType::LocalFile {
        return true;
    }
    let ext = resource.extension();
    options.selected_extensions.iter().any(|e| *e == ext)
}

fn matches_tags(resource: &Resource, options: &FilterOptions) -> bool {
    let selected = &options.selected_tag_ids;
    if selected.is_empty() {
        return true;
    }
    match options.settings.filter_mode {
        MatchMode::And => selected.iter().all(|id| resource.has_tag(id)),
        MatchMode::Or => selected.iter().any(|id| resource.has_tag(id)),
    }
}

/// Derive the visible list from the full resource set
///
/// The input is not modified; the result is a sorted copy of the resources
/// that pass every predicate.
///
/// # Examples
/// ```
/// # use resnav::filter::{FilterOptions, filter_resources};
/// # use resnav::model::{Resource, ResourceType};
/// let resources = vec![
///     Resource::new("Rust book", ResourceType::Url, "https://doc.rust-lang.org/book"),
///     Resource::new("Groceries", ResourceType::TextNote, "milk, eggs"),
/// ];
/// let options = FilterOptions::builder().query("rust").build();
/// let visible = filter_resources(&resources, &options);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].title, "Rust book");
/// ```
#[must_use]
pub fn filter_resources(resources: &[Resource], options: &FilterOptions) -> Vec<Resource> {
    let text = TextMatcher::new(options);

    let filtered: Vec<Resource> = resources
        .iter()
        .filter(|r| {
            text.matches(r) && matches_type(r, options) && matches_extension(r, options) && matches_tags(r, options)
        })
        .cloned()
        .collect();

    debug!(
        total = resources.len(),
        visible = filtered.len(),
        sort = ?options.sort_by,
        "filtered resources"
    );
    sort_resources(filtered, options.sort_by)
}

/// Sort resources by the given key
///
/// The sort is stable: resources with equal keys keep their relative order.
#[must_use]
pub fn sort_resources(mut resources: Vec<Resource>, sort_by: SortBy) -> Vec<Resource> {
    match sort_by {
        SortBy::Title => resources.sort_by(|a, b| compare_names(&a.title, &b.title)),
        SortBy::CreatedAt => resources.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::TagCount => resources.sort_by(|a, b| b.tags.len().cmp(&a.tags.len())),
        SortBy::UpdatedAt => resources.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
    resources
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
