//! Outline tree built from resource paths
//!
//! Converts a flat resource list into a forest of folder and file nodes by
//! splitting each resource's `path_or_url` into segments:
//!
//! ```text
//! docs/readme.txt        docs/
//! docs/img/logo.png  =>    img/
//! root.txt                   logo.png
//!                          readme.txt
//!                        root.txt
//! ```
//!
//! Siblings are always ordered folders first, then by name. Folder ids are
//! derived from the cumulative path (`folder-docs/img`) so expand/collapse
//! state keyed by id survives rebuilds.
//!
//! Two resources with the same normalized path produce two sibling file
//! nodes; nothing is deduplicated here.

use crate::model::Resource;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Prefix of every folder node id
pub const FOLDER_ID_PREFIX: &str = "folder-";

/// Name given to root files with neither a title nor a path segment
pub const UNTITLED: &str = "Untitled";

/// Kind of an outline node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// A node of the outline tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavTreeNode {
    /// `folder-<path>` for folders, the resource id for files
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Cumulative path for folders, the normalized resource path for files
    pub path: String,
    pub children: Vec<NavTreeNode>,
    /// Only set on file nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
    pub depth: usize,
}

impl NavTreeNode {
    fn folder(name: &str, path: String, depth: usize) -> Self {
        Self {
            id: folder_id(&path),
            name: name.to_string(),
            kind: NodeKind::Folder,
            path,
            children: Vec::new(),
            resource: None,
            depth,
        }
    }

    fn file(name: String, path: String, resource: &Resource, depth: usize) -> Self {
        Self {
            id: resource.id.clone(),
            name,
            kind: NodeKind::File,
            path,
            children: Vec::new(),
            resource: Some(resource.clone()),
            depth,
        }
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    /// Number of file nodes in this subtree, counting the node itself
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 1,
            NodeKind::Folder => self.children.iter().map(Self::file_count).sum(),
        }
    }
}

/// Stable id of the folder at a cumulative path
#[must_use]
pub fn folder_id(path: &str) -> String {
    format!("{FOLDER_ID_PREFIX}{path}")
}

/// Normalize a resource path for tree placement
///
/// Backslashes become forward slashes and a leading `file:///` is removed.
/// Returns the cleaned path together with its non-empty segments.
///
/// # Examples
/// ```
/// # use resnav::tree::normalize_path;
/// let (clean, parts) = normalize_path("file:///C:\\Users\\me\\notes.md");
/// assert_eq!(clean, "C:/Users/me/notes.md");
/// assert_eq!(parts, vec!["C:", "Users", "me", "notes.md"]);
/// ```
#[must_use]
pub fn normalize_path(path_or_url: &str) -> (String, Vec<&str>) {
    let slashed = path_or_url.replace('\\', "/");
    let clean = slashed
        .strip_prefix("file:///")
        .map_or_else(|| slashed.clone(), ToString::to_string);

    let offset = path_or_url.len() - clean.len();
    let parts = split_segments(path_or_url, offset);
    (clean, parts)
}

// Segments are taken from the original string so they can borrow from it;
// `\` and `/` are both one byte, so offsets line up with the cleaned path.
fn split_segments(original: &str, offset: usize) -> Vec<&str> {
    original[offset..]
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect()
}

/// Name comparison used for sibling ordering and title sorting
///
/// Case-insensitive first so `apple` sorts next to `Apple`, with the raw
/// string as tie-break to keep the order total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_nodes(a: &NavTreeNode, b: &NavTreeNode) -> Ordering {
    match (a.kind, b.kind) {
        (NodeKind::Folder, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => Ordering::Greater,
        _ => compare_names(&a.name, &b.name),
    }
}

/// Insert keeping siblings sorted; equal nodes keep insertion order
fn insert_sorted(siblings: &mut Vec<NavTreeNode>, node: NavTreeNode) -> usize {
    let index = siblings.partition_point(|n| compare_nodes(n, &node) != Ordering::Greater);
    siblings.insert(index, node);
    index
}

fn folder_children<'a>(
    siblings: &'a mut Vec<NavTreeNode>,
    parts: &[&str],
    depth: usize,
    prefix: &str,
) -> &'a mut Vec<NavTreeNode> {
    let Some((name, rest)) = parts.split_first() else {
        return siblings;
    };

    let path = if prefix.is_empty() {
        (*name).to_string()
    } else {
        format!("{prefix}/{name}")
    };

    let index = match siblings.iter().position(|n| n.is_folder() && n.name == *name) {
        Some(index) => index,
        None => insert_sorted(siblings, NavTreeNode::folder(name, path.clone(), depth)),
    };

    folder_children(&mut siblings[index].children, rest, depth + 1, &path)
}

/// Build the outline forest for a set of resources
///
/// Resources whose path has fewer than two segments become root files named
/// by their title (or the sole segment, or [`UNTITLED`]). Deeper paths create
/// or reuse one folder per leading segment and place a file node, named by
/// the title or the last segment, under the deepest folder.
#[must_use]
pub fn build_resource_tree(resources: &[Resource]) -> Vec<NavTreeNode> {
    let mut roots: Vec<NavTreeNode> = Vec::new();

    for resource in resources {
        let (clean, parts) = normalize_path(&resource.path_or_url);

        match parts.split_last() {
            Some((last, folders)) if !folders.is_empty() => {
                let name = if resource.title.is_empty() {
                    (*last).to_string()
                } else {
                    resource.title.clone()
                };
                let siblings = folder_children(&mut roots, folders, 0, "");
                insert_sorted(siblings, NavTreeNode::file(name, clean, resource, folders.len()));
            }
            sole => {
                let name = if !resource.title.is_empty() {
                    resource.title.clone()
                } else {
                    sole.map_or_else(|| UNTITLED.to_string(), |(last, _)| (*last).to_string())
                };
                insert_sorted(&mut roots, NavTreeNode::file(name, clean, resource, 0));
            }
        }
    }

    debug!(resources = resources.len(), roots = roots.len(), "built resource tree");
    roots
}

/// Find a node by id anywhere in the forest
#[must_use]
pub fn find_node<'a>(forest: &'a [NavTreeNode], id: &str) -> Option<&'a NavTreeNode> {
    forest.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_node(&node.children, id)
        }
    })
}
