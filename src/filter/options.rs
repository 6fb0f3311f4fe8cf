//! Filter option types
//!
//! - `FilterSettings`: the persisted matching preferences (tag mode, case, path)
//! - `FilterOptions`: one query against a resource list, settings included
//! - `FilterOptionsBuilder`: fluent construction of `FilterOptions`

use crate::model::{NO_EXTENSION, ResourceType};
use serde::{Deserialize, Serialize};

/// How multiple selected tags combine (AND = every tag, OR = any tag)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchMode {
    /// Resource must carry every selected tag
    #[default]
    And,
    /// Resource must carry at least one selected tag
    Or,
}

/// Sort order of the visible list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Most recently modified first
    #[default]
    UpdatedAt,
    /// Title, ascending
    Title,
    /// Newest first
    CreatedAt,
    /// Most tags first
    TagCount,
}

/// Matching preferences shared by every query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterSettings {
    #[serde(default)]
    pub filter_mode: MatchMode,
    #[serde(default)]
    pub filter_case_sensitive: bool,
    #[serde(default = "default_include_path")]
    pub filter_include_path: bool,
}

const fn default_include_path() -> bool {
    true
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            filter_mode: MatchMode::And,
            filter_case_sensitive: false,
            filter_include_path: default_include_path(),
        }
    }
}

/// A complete query against a resource list
///
/// Empty selections mean "no constraint" for that predicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub search_query: String,
    pub regex_enabled: bool,
    pub selected_types: Vec<ResourceType>,
    /// Extensions in `.ext` form, or [`NO_EXTENSION`]
    pub selected_extensions: Vec<String>,
    pub selected_tag_ids: Vec<String>,
    pub sort_by: SortBy,
    pub settings: FilterSettings,
}

impl FilterOptions {
    /// Create a new options builder
    #[must_use]
    pub fn builder() -> FilterOptionsBuilder {
        FilterOptionsBuilder::default()
    }

    /// Whether no predicate constrains the list
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search_query.is_empty()
            && self.selected_types.is_empty()
            && self.selected_extensions.is_empty()
            && self.selected_tag_ids.is_empty()
    }
}

/// Bring user-typed extensions into the `.ext` form used for matching
///
/// # Examples
/// ```
/// # use resnav::filter::normalize_extension;
/// assert_eq!(normalize_extension("PDF"), ".pdf");
/// assert_eq!(normalize_extension(".Md"), ".md");
/// assert_eq!(normalize_extension("(none)"), "(none)");
/// ```
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext == NO_EXTENSION {
        return ext.to_string();
    }
    let bare = ext.trim_start_matches('.').to_lowercase();
    format!(".{bare}")
}

/// Builder for `FilterOptions`
#[derive(Debug, Clone, Default)]
pub struct FilterOptionsBuilder {
    options: FilterOptions,
}

impl FilterOptionsBuilder {
    /// Set the free-text query
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.options.search_query = query.into();
        self
    }

    /// Treat the query as a regular expression
    #[must_use]
    pub const fn regex(mut self, enabled: bool) -> Self {
        self.options.regex_enabled = enabled;
        self
    }

    /// Restrict to the given resource types
    #[must_use]
    pub fn types(mut self, types: Vec<ResourceType>) -> Self {
        self.options.selected_types = types;
        self
    }

    /// Add a single resource type
    #[must_use]
    pub fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.options.selected_types.push(resource_type);
        self
    }

    /// Restrict local files to the given extensions (normalized)
    #[must_use]
    pub fn extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.options.selected_extensions = extensions.iter().map(|e| normalize_extension(e.as_ref())).collect();
        self
    }

    /// Add a single extension (normalized)
    #[must_use]
    pub fn extension(mut self, extension: &str) -> Self {
        self.options.selected_extensions.push(normalize_extension(extension));
        self
    }

    /// Require the given tag ids, combined per `settings.filter_mode`
    #[must_use]
    pub fn tags(mut self, tag_ids: Vec<String>) -> Self {
        self.options.selected_tag_ids = tag_ids;
        self
    }

    /// Add a single tag id
    #[must_use]
    pub fn tag(mut self, tag_id: impl Into<String>) -> Self {
        self.options.selected_tag_ids.push(tag_id.into());
        self
    }

    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.options.sort_by = sort_by;
        self
    }

    #[must_use]
    pub const fn settings(mut self, settings: FilterSettings) -> Self {
        self.options.settings = settings;
        self
    }

    #[must_use]
    pub const fn match_mode(mut self, mode: MatchMode) -> Self {
        self.options.settings.filter_mode = mode;
        self
    }

    #[must_use]
    pub const fn case_sensitive(mut self, enabled: bool) -> Self {
        self.options.settings.filter_case_sensitive = enabled;
        self
    }

    #[must_use]
    pub const fn include_path(mut self, enabled: bool) -> Self {
        self.options.settings.filter_include_path = enabled;
        self
    }

    /// Build the `FilterOptions`
    #[must_use]
    pub fn build(self) -> FilterOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = FilterSettings::default();
        assert_eq!(settings.filter_mode, MatchMode::And);
        assert!(!settings.filter_case_sensitive);
        assert!(settings.filter_include_path);
    }

    #[test]
    fn test_settings_wire_format() {
        let settings: FilterSettings = serde_json::from_str(r#"{"filterMode": "OR"}"#).unwrap();
        assert_eq!(settings.filter_mode, MatchMode::Or);
        assert!(settings.filter_include_path);

        let sort: SortBy = serde_json::from_str("\"tagCount\"").unwrap();
        assert_eq!(sort, SortBy::TagCount);
    }

    #[test]
    fn test_builder() {
        let options = FilterOptions::builder()
            .query("rust")
            .regex(true)
            .resource_type(ResourceType::Url)
            .extensions(&["PDF", ".md"])
            .tag("t1")
            .match_mode(MatchMode::Or)
            .sort_by(SortBy::Title)
            .build();

        assert_eq!(options.search_query, "rust");
        assert!(options.regex_enabled);
        assert_eq!(options.selected_types, vec![ResourceType::Url]);
        assert_eq!(options.selected_extensions, vec![".pdf".to_string(), ".md".to_string()]);
        assert_eq!(options.selected_tag_ids, vec!["t1".to_string()]);
        assert_eq!(options.settings.filter_mode, MatchMode::Or);
        assert_eq!(options.sort_by, SortBy::Title);
        assert!(!options.is_unfiltered());
    }

    #[test]
    fn test_default_options_unfiltered() {
        assert!(FilterOptions::default().is_unfiltered());
        assert_eq!(FilterOptions::default().sort_by, SortBy::UpdatedAt);
    }
}
