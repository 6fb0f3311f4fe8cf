//! Resnav CLI application entry point
//!
//! This is the main executable for the resnav resource library. It provides a
//! command-line interface for filtering, outlining and merging library files.
//!
//! # Usage
//!
//! ```bash
//! # Register a library and make it the default
//! resnav lib add main ~/libraries/main.json
//!
//! # List resources (default command), filtered and sorted
//! resnav
//! resnav list report -t local-file -e pdf --sort title
//!
//! # Show the folder outline of matching resources
//! resnav tree -g work-tag-id
//!
//! # Merge another library in, writing the result elsewhere
//! resnav merge exported.json -o merged.json
//!
//! # Import `title, path, tag|tag` lines
//! resnav import bookmarks.txt
//!
//! # Quiet mode (only output results)
//! resnav -q list
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/resnav/config.toml` on Linux) and created on first run.
//! Logging goes to stderr and is controlled with `RUST_LOG` or `--verbose`.

use resnav::{
    ResnavError,
    audit::actions,
    cli::{Cli, Commands, FilterArgs, LibCommands},
    config::ResnavConfig,
    filter::filter_resources,
    import, merge,
    model::{Library, Resource, now_millis},
    output,
    tree::build_resource_tree,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, ResnavError>;

/// Read a library JSON file
///
/// With `create_missing`, a missing file yields a new empty library named
/// after the file stem.
///
/// # Errors
///
/// Returns `ResnavError` if the file cannot be read or is not a library.
fn load_library(path: &Path, create_missing: bool) -> Result<Library> {
    if create_missing && !path.exists() {
        let name = path
            .file_stem()
            .map_or_else(|| import::UNTITLED_LIBRARY.to_string(), |s| s.to_string_lossy().into_owned());
        debug!(path = %path.display(), "library file missing, starting a new library");
        return Ok(Library::new(name));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| ResnavError::InvalidInput(format!("Cannot read library '{}': {e}", path.display())))?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a library in its stored form
///
/// # Errors
///
/// Returns `ResnavError` if serialization or the write fails.
fn save_library(path: &Path, library: Library) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&library.into_stored())?;
    fs::write(path, json)?;
    Ok(())
}

/// Resolve the library a command works on
///
/// # Errors
///
/// Returns `ResnavError::InvalidInput` if no library was given and no default is set.
fn library_path(config: &ResnavConfig, command: &Commands) -> Result<PathBuf> {
    config.resolve_library(command.get_lib()).ok_or_else(|| {
        ResnavError::InvalidInput(
            "No library given. Use --lib <NAME|PATH>, or 'resnav lib add <name> <path>' to register a default.".into(),
        )
    })
}

/// Handle the list command - print the filtered, sorted resources
///
/// # Errors
///
/// Returns `ResnavError` if the library cannot be loaded.
fn handle_list_command(path: &Path, filter: &FilterArgs, config: &ResnavConfig, quiet: bool) -> Result<()> {
    let library = load_library(path, false)?;
    let options = filter.to_options(config);
    let visible = filter_resources(&library.resources, &options);

    if visible.is_empty() {
        if !quiet {
            println!("No resources found.");
        }
        return Ok(());
    }

    if !quiet {
        println!("{} of {} resource(s) in '{}':", visible.len(), library.resources.len(), library.name);
    }
    let tags = library.tags_with_default();
    let names = output::tag_names(&tags);
    for resource in &visible {
        println!("{}", output::resource_line(resource, &names, quiet));
    }
    Ok(())
}

/// Handle the tree command - print the filtered resources as an outline
///
/// # Errors
///
/// Returns `ResnavError` if the library cannot be loaded.
fn handle_tree_command(path: &Path, filter: &FilterArgs, config: &ResnavConfig, quiet: bool) -> Result<()> {
    let library = load_library(path, false)?;
    let visible = filter_resources(&library.resources, &filter.to_options(config));
    let forest = build_resource_tree(&visible);

    if forest.is_empty() && !quiet {
        println!("No resources found.");
    }
    for line in output::tree_lines(&forest, quiet) {
        println!("{line}");
    }
    Ok(())
}

/// Handle the merge command - fold a source JSON file into the library
///
/// # Errors
///
/// Returns `ResnavError` if either file cannot be read or parsed, or the result
/// cannot be written.
fn handle_merge_command(path: &Path, source: &Path, output_path: Option<&Path>, quiet: bool) -> Result<()> {
    let target = load_library(path, true)?;
    let text = fs::read_to_string(source)?;
    let partial = import::parse_partial_library(&text)?;

    let report = merge::merge_at(&target, &partial, now_millis());
    if !quiet {
        println!("{}", output::merge_summary(&report));
    }
    save_library(output_path.unwrap_or(path), report.library)
}

/// Handle the import command - append resources from a text file
///
/// # Errors
///
/// Returns `ResnavError` if the files cannot be read, a line cannot be parsed,
/// or the result cannot be written.
fn handle_import_command(
    path: &Path,
    file: &Path,
    paths: bool,
    recursive: bool,
    output_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let mut library = load_library(path, true)?;
    let text = fs::read_to_string(file)?;

    let (resources, new_tags, action): (Vec<Resource>, _, _) = if paths {
        let listed: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        (import::resources_from_paths(&listed, recursive), Vec::new(), actions::FILE_IMPORT)
    } else {
        let parsed = import::parse_text_import(&text, &library.tags_with_default())?;
        (parsed.resources, parsed.new_tags, actions::TEXT_IMPORT)
    };

    let offered = resources.len();
    let created = new_tags.len();
    let added = library.append_imported(resources, new_tags, action);
    if !quiet {
        println!(
            "Imported {added} of {offered} resource(s) ({} duplicate(s) skipped, {created} new tag(s))",
            offered - added
        );
    }
    save_library(output_path.unwrap_or(path), library)
}

/// Handle the restore command - sanitize a backup into a library file
///
/// # Errors
///
/// Returns `ResnavError` if the backup is not a JSON object or the output cannot be written.
fn handle_restore_command(backup: &Path, output_path: &Path, quiet: bool) -> Result<()> {
    let text = fs::read_to_string(backup)?;
    let library = import::parse_library(&text)?;
    if !quiet {
        println!(
            "Restored '{}' with {} resource(s) and {} tag(s) to {}",
            library.name,
            library.resources.len(),
            library.tags.len(),
            output_path.display()
        );
    }
    save_library(output_path, library)
}

/// Handle the extensions command - list local file extensions
///
/// # Errors
///
/// Returns `ResnavError` if the library cannot be loaded.
fn handle_extensions_command(path: &Path, quiet: bool) -> Result<()> {
    let library = load_library(path, false)?;
    let extensions = library.available_extensions();

    if extensions.is_empty() {
        if !quiet {
            println!("No local files in library.");
        }
        return Ok(());
    }
    if !quiet {
        println!("Extensions in library:");
    }
    for ext in extensions {
        if quiet {
            println!("{ext}");
        } else {
            println!("  {ext}");
        }
    }
    Ok(())
}

/// Handle the tags command - list tags with usage counts
///
/// # Errors
///
/// Returns `ResnavError` if the library cannot be loaded.
fn handle_tags_command(path: &Path, quiet: bool) -> Result<()> {
    let library = load_library(path, false)?;
    if !quiet {
        println!("Tags in '{}':", library.name);
    }
    for tag in library.tags_with_default() {
        let count = library.resources.iter().filter(|r| r.has_tag(&tag.id)).count();
        println!("{}", output::tag_with_count(&tag, count, quiet));
    }
    Ok(())
}

/// Handle the lib command - manage named library files
///
/// # Errors
///
/// Returns `ResnavError` if the library name is unknown or the configuration
/// cannot be saved.
fn handle_lib_command(mut config: ResnavConfig, command: &LibCommands, quiet: bool) -> Result<()> {
    match command {
        LibCommands::Add { name, path } => {
            if config.libraries.contains_key(name) {
                return Err(ResnavError::InvalidInput(format!("Library '{name}' already exists")));
            }
            config.add_library(name.clone(), path.clone());
            if !quiet {
                println!("Library '{name}' added at {}", path.display());
            }
            if config.libraries.len() == 1 {
                config.set_default_library(name.clone())?;
                if !quiet {
                    println!("Set '{name}' as default library");
                }
            }
            config.save()?;
        }
        LibCommands::List => {
            if config.libraries.is_empty() {
                if !quiet {
                    println!("No libraries configured.");
                    println!("Add one with: resnav lib add <name> <path>");
                }
                return Ok(());
            }
            if !quiet {
                println!("Configured libraries:");
            }
            let mut names: Vec<_> = config.libraries.keys().collect();
            names.sort();
            for name in names {
                if quiet {
                    println!("{name}");
                } else {
                    let marker = if config.default_library.as_ref() == Some(name) { " (default)" } else { "" };
                    println!("  {name} -> {}{marker}", config.libraries[name].display());
                }
            }
        }
        LibCommands::Remove { name } => {
            let Some(path) = config.remove_library(name) else {
                return Err(ResnavError::InvalidInput(format!("Library '{name}' does not exist")));
            };
            config.save()?;
            if !quiet {
                println!("Library '{name}' removed from configuration");
                println!("Note: {} was NOT deleted", path.display());
            }
        }
        LibCommands::SetDefault { name } => {
            config.set_default_library(name.clone())?;
            config.save()?;
            if !quiet {
                println!("Set '{name}' as default library");
            }
        }
    }
    Ok(())
}

/// Main entry point for the resnav application
///
/// Parses command-line arguments, installs logging, loads configuration and
/// dispatches to the appropriate command handler.
///
/// # Errors
///
/// Returns `ResnavError` if configuration loading fails or any command handler
/// returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let config = ResnavConfig::load()?;
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    match &command {
        Commands::Lib { command } => handle_lib_command(config, command, quiet),
        Commands::Restore { backup, output } => handle_restore_command(backup, output, quiet),
        Commands::List { filter, .. } => {
            handle_list_command(&library_path(&config, &command)?, filter, &config, quiet)
        }
        Commands::Tree { filter, .. } => {
            handle_tree_command(&library_path(&config, &command)?, filter, &config, quiet)
        }
        Commands::Merge { source, output, .. } => handle_merge_command(
            &library_path(&config, &command)?,
            source,
            output.output.as_deref(),
            quiet,
        ),
        Commands::Import {
            file,
            paths,
            recursive,
            output,
            ..
        } => handle_import_command(
            &library_path(&config, &command)?,
            file,
            *paths,
            *recursive,
            output.output.as_deref(),
            quiet,
        ),
        Commands::Extensions { .. } => handle_extensions_command(&library_path(&config, &command)?, quiet),
        Commands::Tags { .. } => handle_tags_command(&library_path(&config, &command)?, quiet),
    }
}
