//! Importing resources from outside the application
//!
//! Covers the caller side of a merge or restore: turning text, path listings
//! and JSON into model values.
//!
//! - [`parse_text_import`]: one resource per line, `title, path[, tag|tag]`
//! - [`resources_from_paths`]: local files picked from a folder
//! - [`filter_duplicate_resources`]: drop incoming copies of known resources
//! - [`parse_partial_library`] / [`sanitize_library`]: JSON library data
//!
//! Parse failures are reported as [`ImportError`]; the merge itself assumes
//! already-parsed input.

pub mod error;

pub use error::ImportError;

use crate::audit::{self, actions};
use crate::model::{
    DEFAULT_RESOURCE_COLOR, DEFAULT_TITLE_COLOR, HistoryEntry, Library, PartialLibrary, Resource,
    ResourceType, Tag, new_id, now_millis, strip_default_tag,
};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Name given to restored libraries that carry none
pub const UNTITLED_LIBRARY: &str = "Untitled library";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^(https?://|www\.)[^\s/$.?#].[^\s]*$")
        .case_insensitive(true)
        .build()
        .expect("URL pattern is valid")
});

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^([a-z]:\\|\\|(?:\.\.?/)+|/)")
        .case_insensitive(true)
        .build()
        .expect("path pattern is valid")
});

/// Guess the resource type of a pasted path or URL
///
/// `http(s)://` and `www.` addresses are URLs, absolute, drive-letter, UNC and
/// `./`-relative paths are local files, anything else is note text.
///
/// # Examples
/// ```
/// # use resnav::import::detect_resource_type;
/// # use resnav::model::ResourceType;
/// assert_eq!(detect_resource_type("https://docs.rs"), ResourceType::Url);
/// assert_eq!(detect_resource_type("C:\\work\\a.pdf"), ResourceType::LocalFile);
/// assert_eq!(detect_resource_type("call Bob on Friday"), ResourceType::TextNote);
/// ```
#[must_use]
pub fn detect_resource_type(path_or_url: &str) -> ResourceType {
    if URL_PATTERN.is_match(path_or_url) {
        ResourceType::Url
    } else if PATH_PATTERN.is_match(path_or_url) {
        ResourceType::LocalFile
    } else {
        ResourceType::TextNote
    }
}

/// Resources and implicitly created tags from a text import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextImport {
    pub resources: Vec<Resource>,
    /// Tags named in the text that did not exist yet
    pub new_tags: Vec<Tag>,
}

/// Parse delimited text into resources
///
/// Each non-blank line is `title<sep>path_or_url[<sep>tag1|tag2...]`, where
/// `<sep>` is a tab when the line contains one and a comma otherwise. Quote
/// characters are ordinary text. Lines without both a title and a path are
/// skipped. Tag names are resolved by
/// exact name against `existing_tags` (pass [`Library::tags_with_default`]),
/// then against tags created earlier in the same import; unknown names become
/// new tags. Every resource also carries the default tag.
///
/// # Errors
///
/// Returns `ImportError::Csv` if a line cannot be split into fields.
pub fn parse_text_import(text: &str, existing_tags: &[Tag]) -> Result<TextImport, ImportError> {
    let mut name_to_id: HashMap<String, String> = existing_tags
        .iter()
        .map(|t| (t.name.clone(), t.id.clone()))
        .collect();
    let mut import = TextImport::default();
    let now = now_millis();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let delimiter = if line.contains('\t') { b'\t' } else { b',' };
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(delimiter)
            .from_reader(line.as_bytes());

        let Some(record) = rdr.records().next().transpose()? else {
            continue;
        };

        let title = record.get(0).map(str::trim).unwrap_or_default();
        let path_or_url = record.get(1).map(str::trim).unwrap_or_default();
        if title.is_empty() || path_or_url.is_empty() {
            continue;
        }

        let mut resource = Resource::new(title, detect_resource_type(path_or_url), path_or_url);
        resource.created_at = now;
        resource.updated_at = now;

        let tag_names = record.get(2).map(str::trim).unwrap_or_default();
        for name in tag_names.split('|').map(str::trim).filter(|n| !n.is_empty()) {
            let id = match name_to_id.get(name) {
                Some(id) => id.clone(),
                None => {
                    let tag = Tag::new(name, color_for_name(name));
                    name_to_id.insert(name.to_string(), tag.id.clone());
                    let id = tag.id.clone();
                    import.new_tags.push(tag);
                    id
                }
            };
            if !resource.has_tag(&id) {
                resource.tags.push(id);
            }
        }

        import.resources.push(resource);
    }

    debug!(
        resources = import.resources.len(),
        new_tags = import.new_tags.len(),
        "parsed text import"
    );
    Ok(import)
}

/// Stable pastel color for a tag created on the fly
fn color_for_name(name: &str) -> String {
    let hue = name
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)))
        % 360;
    hsl_to_hex(f64::from(hue), 60.0, 55.0)
}

/// Convert an HSL color (degrees, percent, percent) to `#rrggbb`
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let l = l / 100.0;
    let a = s * l.min(1.0 - l) / 100.0;
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        // Clamped to 0..=255 before the cast
        (255.0 * color).round().clamp(0.0, 255.0) as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

/// Build local-file resources from picked file paths
///
/// Titles are the last path segment. Unless `recursive` is set, entries more
/// than one level below the picked folder (more than two segments) are left
/// out.
#[must_use]
pub fn resources_from_paths<S: AsRef<str>>(paths: &[S], recursive: bool) -> Vec<Resource> {
    paths
        .iter()
        .map(|p| p.as_ref())
        .filter_map(|path| {
            let normalized = path.replace('\\', "/");
            let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
            if !recursive && segments.len() > 2 {
                return None;
            }
            let title = segments.last().copied().unwrap_or(path);
            Some(Resource::new(title, ResourceType::LocalFile, path))
        })
        .collect()
}

/// Result of [`filter_duplicate_resources`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateFilter {
    /// Existing resources followed by the accepted incoming ones
    pub resources: Vec<Resource>,
    /// The accepted incoming resources
    pub added: Vec<Resource>,
    /// Incoming resources dropped as duplicates
    pub skipped: usize,
}

/// Append incoming resources that are not already present
///
/// A resource is a duplicate when an existing or previously accepted resource
/// has the same title, type and path.
#[must_use]
pub fn filter_duplicate_resources(existing: &[Resource], incoming: Vec<Resource>) -> DuplicateFilter {
    let mut outcome = DuplicateFilter {
        resources: existing.to_vec(),
        ..DuplicateFilter::default()
    };

    for resource in incoming {
        let duplicate = outcome.resources.iter().any(|r| {
            r.title == resource.title
                && r.resource_type == resource.resource_type
                && r.path_or_url == resource.path_or_url
        });
        if duplicate {
            outcome.skipped += 1;
            continue;
        }
        outcome.added.push(resource.clone());
        outcome.resources.push(resource);
    }
    outcome
}

/// Parse JSON text as merge source data
///
/// # Errors
///
/// Returns `ImportError::Json` for malformed JSON or mistyped fields and
/// `ImportError::NotAnObject` if the top-level value is not an object.
pub fn parse_partial_library(text: &str) -> Result<PartialLibrary, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ImportError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse JSON text as a full library to restore, see [`sanitize_library`]
///
/// # Errors
///
/// Returns `ImportError` if the text is not a JSON object or its arrays hold
/// mistyped entries.
pub fn parse_library(text: &str) -> Result<Library, ImportError> {
    sanitize_library(serde_json::from_str(text)?)
}

/// Turn a parsed JSON object into a library ready to store
///
/// Missing id, name and timestamps are filled in, non-array `resources`,
/// `tags` and `history` are treated as empty, the default tag is dropped and a
/// restore entry is prepended to the history. Resources get their color
/// defaults and at least one tag.
///
/// # Errors
///
/// Returns `ImportError::NotAnObject` if `value` is not an object and
/// `ImportError::Json` if array entries do not have the expected shape.
pub fn sanitize_library(value: Value) -> Result<Library, ImportError> {
    let Value::Object(mut map) = value else {
        return Err(ImportError::NotAnObject);
    };
    let now = now_millis();

    let id = take_string(&mut map, "id").unwrap_or_else(new_id);
    let name = take_string(&mut map, "name").unwrap_or_else(|| UNTITLED_LIBRARY.to_string());
    let created_at = take_timestamp(&mut map, "createdAt").unwrap_or(now);
    let updated_at = take_timestamp(&mut map, "updatedAt").unwrap_or(now);

    let mut resources: Vec<Resource> = take_array(&mut map, "resources")?;
    for resource in &mut resources {
        resource.ensure_tagged();
        if resource.color.as_deref().is_none_or(str::is_empty) {
            resource.color = Some(DEFAULT_RESOURCE_COLOR.to_string());
        }
        if resource.title_color.as_deref().is_none_or(str::is_empty) {
            resource.title_color = Some(DEFAULT_TITLE_COLOR.to_string());
        }
    }

    let mut tags: Vec<Tag> = take_array(&mut map, "tags")?;
    strip_default_tag(&mut tags);

    let mut history = vec![audit::create_entry_at(actions::LIBRARY_IMPORTED, "Data restored", None, now)];
    let previous: Vec<HistoryEntry> = take_array(&mut map, "history")?;
    history.extend(previous);

    Ok(Library {
        id,
        name,
        resources,
        tags,
        created_at,
        updated_at,
        history,
    })
}

fn take_string(map: &mut serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn take_timestamp(map: &mut serde_json::Map<String, Value>, key: &str) -> Option<i64> {
    map.remove(key).and_then(|v| v.as_i64()).filter(|t| *t != 0)
}

fn take_array<T: serde::de::DeserializeOwned>(
    map: &mut serde_json::Map<String, Value>,
    key: &str,
) -> Result<Vec<T>, ImportError> {
    match map.remove(key) {
        Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value)?),
        _ => Ok(Vec::new()),
    }
}
