//! Output formatting for CLI display
//!
//! This module provides utilities for formatting resources, tags and the
//! navigation tree in the terminal. Every formatter has a quiet form that
//! prints only the bare value, for piping into other tools.

use crate::merge::MergeReport;
use crate::model::{Resource, ResourceType, Tag};
use crate::tree::NavTreeNode;
use colored::{ColoredString, Colorize};
use std::collections::HashMap;

/// Color a resource type label
#[must_use]
pub fn colorize_type(resource_type: ResourceType) -> ColoredString {
    let label = resource_type.as_str();
    match resource_type {
        ResourceType::LocalFile => label.green(),
        ResourceType::LocalFolder => label.blue(),
        ResourceType::Url => label.cyan(),
        ResourceType::Cloud => label.magenta(),
        ResourceType::TextNote => label.yellow(),
        ResourceType::Other => label.normal(),
    }
}

/// Map tag ids to display names
///
/// Pass [`Library::tags_with_default`](crate::model::Library::tags_with_default)
/// so the default tag resolves too.
#[must_use]
pub fn tag_names(tags: &[Tag]) -> HashMap<&str, &str> {
    tags.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect()
}

/// Format a resource with its type and tags for display
///
/// Tag ids missing from `names` are shown as-is.
#[must_use]
pub fn resource_line(resource: &Resource, names: &HashMap<&str, &str>, quiet: bool) -> String {
    if quiet {
        return resource.path_or_url.clone();
    }

    let tags: Vec<&str> = resource
        .tags
        .iter()
        .map(|id| names.get(id.as_str()).copied().unwrap_or(id))
        .collect();

    format!(
        "  {} ({}) {} [{}]",
        resource.title.bold(),
        colorize_type(resource.resource_type),
        resource.path_or_url.dimmed(),
        tags.join(", ")
    )
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &Tag, count: usize, quiet: bool) -> String {
    if quiet {
        tag.name.clone()
    } else if tag.is_reserved() {
        format!("  {} (used by {count} resource(s), default)", tag.name.bold())
    } else {
        format!("  {} {} (used by {count} resource(s))", tag.name.bold(), tag.color.dimmed())
    }
}

/// Render a navigation forest as indented lines, depth first
///
/// Folders end in `/`. In quiet mode only file paths are printed.
#[must_use]
pub fn tree_lines(forest: &[NavTreeNode], quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();
    push_tree_lines(forest, 0, quiet, &mut lines);
    lines
}

fn push_tree_lines(nodes: &[NavTreeNode], indent: usize, quiet: bool, lines: &mut Vec<String>) {
    for node in nodes {
        if node.is_folder() {
            if !quiet {
                lines.push(format!(
                    "{}{} {}",
                    "  ".repeat(indent),
                    format!("{}/", node.name).blue().bold(),
                    format!("({})", node.file_count()).dimmed()
                ));
            }
            push_tree_lines(&node.children, indent + 1, quiet, lines);
        } else if quiet {
            lines.push(node.path.clone());
        } else {
            lines.push(format!("{}{}", "  ".repeat(indent), node.name));
        }
    }
}

/// Summarize a merge for the user
#[must_use]
pub fn merge_summary(report: &MergeReport) -> String {
    let mut summary = format!("Merged {} new resource(s)", report.added.to_string().green());
    if report.duplicates > 0 {
        summary.push_str(&format!(", skipped {} duplicate(s)", report.duplicates));
    }
    if report.malformed > 0 {
        summary.push_str(&format!(", skipped {} without a path", report.malformed.to_string().red()));
    }
    summary.push_str(&format!(
        "; tags: {} created, {} reused",
        report.tags_created, report.tags_reused
    ));
    summary
}
