//! Integration tests for resnav
//!
//! These tests exercise the public API end to end: library files on disk,
//! filtering into the outline tree, importing and merging.

use resnav::config::ResnavConfig;
use resnav::filter::{FilterOptions, MatchMode, SortBy, filter_resources, neighbors};
use resnav::import::{parse_library, parse_partial_library, parse_text_import, resources_from_paths};
use resnav::merge::{merge, merge_at};
use resnav::model::{DEFAULT_TAG_ID, Library, PartialLibrary, Resource, ResourceType, Tag};
use resnav::tree::{NodeKind, build_resource_tree, find_node, folder_id};
use std::fs;
use std::path::Path;

/// Helper function to build a small library with two tags
fn sample_library() -> Library {
    let mut library = Library::new("Research");
    let work = Tag::new("Work", "#3b82f6");
    let reading = Tag::new("Reading", "#22c55e");
    let work_id = work.id.clone();
    let reading_id = reading.id.clone();
    library.add_tag(work).unwrap();
    library.add_tag(reading).unwrap();

    let mut report = Resource::new("Quarterly report", ResourceType::LocalFile, "/work/2024/report.pdf");
    report.tags = vec![work_id.clone()];
    let mut notes = Resource::new("Meeting notes", ResourceType::LocalFile, "/work/notes.md");
    notes.tags = vec![work_id, reading_id.clone()];
    let mut book = Resource::new("Rust book", ResourceType::Url, "https://doc.rust-lang.org/book");
    book.tags = vec![reading_id];
    let todo = Resource::new("Groceries", ResourceType::TextNote, "milk, eggs");

    for resource in [report, notes, book, todo] {
        library.save_resource(resource).unwrap();
    }
    library
}

/// Helper function to write a library the way the CLI stores it
fn write_library(path: &Path, library: Library) {
    fs::write(path, serde_json::to_string_pretty(&library.into_stored()).unwrap()).unwrap();
}

fn read_library(path: &Path) -> Library {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_library_file_roundtrip_keeps_default_tag_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    let library = sample_library();
    write_library(&path, library.clone());

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"pathOrUrl\""));
    assert!(raw.contains("\"local-file\""));
    assert!(!raw.contains("\"isDefault\""));

    let loaded = read_library(&path);
    assert_eq!(loaded, library);
    assert_eq!(loaded.tags_with_default()[0].id, DEFAULT_TAG_ID);
}

#[test]
fn test_filter_then_tree() {
    let library = sample_library();
    let work_id = library.tags.iter().find(|t| t.name == "Work").unwrap().id.clone();

    let options = FilterOptions::builder()
        .tag(work_id)
        .resource_type(ResourceType::LocalFile)
        .sort_by(SortBy::Title)
        .build();
    let visible = filter_resources(&library.resources, &options);
    let titles: Vec<&str> = visible.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Meeting notes", "Quarterly report"]);

    let forest = build_resource_tree(&visible);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].name, "work");
    assert_eq!(forest[0].file_count(), 2);

    let year = find_node(&forest, &folder_id("work/2024")).unwrap();
    assert_eq!(year.kind, NodeKind::Folder);
    assert_eq!(year.children[0].name, "Quarterly report");
    assert_eq!(year.children[0].depth, 2);

    let nav = neighbors(&visible, &visible[0].id).unwrap();
    assert!(nav.previous.is_none());
    assert_eq!(nav.next.map(|r| r.title.as_str()), Some("Quarterly report"));
    assert_eq!(nav.total, 2);
}

#[test]
fn test_or_mode_and_extension_filter() {
    let library = sample_library();
    let ids: Vec<String> = library.tags.iter().map(|t| t.id.clone()).collect();

    let or = FilterOptions::builder().tags(ids.clone()).match_mode(MatchMode::Or).build();
    assert_eq!(filter_resources(&library.resources, &or).len(), 3);

    let and = FilterOptions::builder().tags(ids).match_mode(MatchMode::And).build();
    assert_eq!(filter_resources(&library.resources, &and).len(), 1);

    let pdf = FilterOptions::builder().extension(".PDF").build();
    let visible = filter_resources(&library.resources, &pdf);
    // notes.md is dropped; the URL and the note are not constrained by extension
    assert_eq!(visible.len(), 3);
    assert!(visible.iter().all(|r| r.title != "Meeting notes"));
    assert_eq!(library.available_extensions(), vec![".md".to_string(), ".pdf".to_string()]);
}

#[test]
fn test_config_settings_drive_filter() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "filter_include_path = false\ndefault_sort = \"title\"\n").unwrap();

    let config = ResnavConfig::load_from(&config_path).unwrap();
    let library = sample_library();
    let options = FilterOptions::builder()
        .query("rust-lang")
        .settings(config.filter_settings())
        .sort_by(config.default_sort)
        .build();
    assert!(filter_resources(&library.resources, &options).is_empty());
}

#[test]
fn test_merge_exported_json_twice() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("export.json");
    write_library(&export_path, sample_library());

    let source = parse_partial_library(&fs::read_to_string(&export_path).unwrap()).unwrap();
    let target = Library::new("Main");

    let first = merge_at(&target, &source, 42);
    assert_eq!(first.added, 4);
    assert_eq!(first.tags_created, 2);
    assert_eq!(first.library.history[0].action, "Merge");
    assert_eq!(first.library.history[0].details, "Merged 4 new resource(s) via import.");
    assert_eq!(first.library.history.len(), 2);

    let second = merge_at(&first.library, &source, 43);
    assert_eq!(second.added, 0);
    assert_eq!(second.duplicates, 4);
    assert_eq!(second.tags_reused, 2);
    assert_eq!(second.library.tags.len(), 2);
    assert_eq!(second.library.resources.len(), 4);

    // Every merged resource points at tags the merged library knows
    let known: Vec<String> = second.library.tags_with_default().into_iter().map(|t| t.id).collect();
    assert!(
        second
            .library
            .resources
            .iter()
            .all(|r| !r.tags.is_empty() && r.tags.iter().all(|id| known.contains(id)))
    );
}

#[test]
fn test_merge_matches_tags_case_insensitively() {
    let mut target = Library::new("Main");
    let work = Tag::new("Work", "#111111");
    let work_id = work.id.clone();
    target.add_tag(work).unwrap();

    let source = parse_partial_library(
        r##"{
            "tags": [{"id": "s1", "name": "work", "color": "#222222"}],
            "resources": [
                {"id": "x", "title": "Design", "type": "local-file", "pathOrUrl": "/a/design.md", "tags": ["s1"]},
                {"id": "y", "title": "No path", "type": "url", "tags": ["s1"]}
            ]
        }"##,
    )
    .unwrap();

    let merged = merge(&target, &source);
    assert_eq!(merged.tags.len(), 1);
    assert_eq!(merged.resources.len(), 1);
    assert_eq!(merged.resources[0].tags, vec![work_id]);
    assert_ne!(merged.resources[0].id, "x");
    assert_eq!(merged.resources[0].color.as_deref(), Some("#ffffff"));
}

#[test]
fn test_merge_empty_source_only_adds_history() {
    let target = sample_library();
    let merged = merge(&target, &PartialLibrary::default());
    assert_eq!(merged.resources, target.resources);
    assert_eq!(merged.tags, target.tags);
    assert_eq!(merged.history.len(), target.history.len() + 1);
}

#[test]
fn test_text_import_into_library_skips_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let text_path = dir.path().join("bookmarks.txt");
    fs::write(
        &text_path,
        "Rust book, https://doc.rust-lang.org/book, Reading\nCrates, https://crates.io, Reading|Tools\n",
    )
    .unwrap();

    let mut library = sample_library();
    let before = library.resources.len();
    let import = parse_text_import(&fs::read_to_string(&text_path).unwrap(), &library.tags_with_default()).unwrap();
    assert_eq!(import.new_tags.len(), 1);
    assert_eq!(import.new_tags[0].name, "Tools");

    let added = library.append_imported(import.resources, import.new_tags, "Text import");
    assert_eq!(added, 1);
    assert_eq!(library.resources.len(), before + 1);
    assert_eq!(library.tags.len(), 3);
    assert_eq!(library.history[0].action, "Text import");
}

#[test]
fn test_folder_listing_import() {
    let listing = ["photos/a.jpg", "photos/trip/b.jpg"];
    let resources = resources_from_paths(&listing, false);
    assert_eq!(resources.len(), 1);

    let forest = build_resource_tree(&resources_from_paths(&listing, true));
    assert_eq!(forest[0].name, "photos");
    assert_eq!(forest[0].file_count(), 2);
}

#[test]
fn test_restore_backup() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("backup.json");
    fs::write(
        &backup,
        r#"{"name": "Old", "resources": [{"id": "r", "title": "T", "type": "cloud", "pathOrUrl": "https://drive/x", "tags": []}]}"#,
    )
    .unwrap();

    let library = parse_library(&fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(library.name, "Old");
    assert_eq!(library.resources[0].tags, vec![DEFAULT_TAG_ID.to_string()]);
    assert_eq!(library.history[0].action, "Library imported");

    assert!(parse_library("{broken").is_err());
}
