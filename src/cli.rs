//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for resnav using the `clap` crate.
//!
//! # Commands
//!
//! - **list**: Print the filtered, sorted resource list (default)
//! - **tree**: Print the filtered resources as a folder outline
//! - **merge**: Fold another library's JSON into a library
//! - **import**: Add resources from delimited text
//! - **restore**: Sanitize a library backup into a storable library file
//! - **extensions** / **tags**: List the filter choices a library offers
//! - **lib**: Manage named library files (add, remove, list, set-default)
//!
//! Commands that read a library take `--lib <NAME|PATH>`; a name registered
//! with `resnav lib add` wins over a path, and the default library is used
//! when the flag is missing.

use crate::config::ResnavConfig;
use crate::filter::{FilterOptions, MatchMode, SortBy};
use crate::model::ResourceType;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tag combination mode accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Resource must carry every selected tag
    And,
    /// Resource must carry at least one selected tag
    Or,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::And => Self::And,
            ModeArg::Or => Self::Or,
        }
    }
}

/// Sort order accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    /// Most recently modified first
    Updated,
    /// Title, ascending
    Title,
    /// Newest first
    Created,
    /// Most tags first
    Tags,
}

impl From<SortArg> for SortBy {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Updated => Self::UpdatedAt,
            SortArg::Title => Self::Title,
            SortArg::Created => Self::CreatedAt,
            SortArg::Tags => Self::TagCount,
        }
    }
}

/// Resource type accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeArg {
    LocalFile,
    LocalFolder,
    Url,
    Cloud,
    TextNote,
    Other,
}

impl From<TypeArg> for ResourceType {
    fn from(kind: TypeArg) -> Self {
        match kind {
            TypeArg::LocalFile => Self::LocalFile,
            TypeArg::LocalFolder => Self::LocalFolder,
            TypeArg::Url => Self::Url,
            TypeArg::Cloud => Self::Cloud,
            TypeArg::TextNote => Self::TextNote,
            TypeArg::Other => Self::Other,
        }
    }
}

/// Library selection shared by every library command
#[derive(Args, Debug, Clone, Default)]
pub struct LibArgs {
    /// Library name from the configuration, or a path to a library JSON file
    #[arg(short = 'l', long = "lib", value_name = "NAME|PATH")]
    pub lib: Option<String>,
}

/// Filter flags shared by `list` and `tree`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Text to look for in titles (and paths unless --no-path)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Treat QUERY as a regular expression
    #[arg(short = 'r', long = "regex")]
    pub regex: bool,

    /// Only show resources of these types
    #[arg(short = 't', long = "type", value_name = "TYPE", num_args = 1..)]
    pub types: Vec<TypeArg>,

    /// Only show local files with these extensions (`pdf`, `.pdf` or `(none)`)
    #[arg(short = 'e', long = "ext", value_name = "EXT", num_args = 1..)]
    pub extensions: Vec<String>,

    /// Only show resources with these tag ids
    #[arg(short = 'g', long = "tag", value_name = "TAG_ID", num_args = 1..)]
    pub tags: Vec<String>,

    /// How multiple tags combine (overrides config)
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Match QUERY case-sensitively (overrides config)
    #[arg(short = 'c', long = "case-sensitive")]
    pub case_sensitive: bool,

    /// Match QUERY against titles only (overrides config)
    #[arg(long = "no-path")]
    pub no_path: bool,

    /// Sort order (overrides config)
    #[arg(short = 's', long = "sort", value_enum)]
    pub sort: Option<SortArg>,
}

impl FilterArgs {
    /// Build the filter query, with config values as the fallback
    #[must_use]
    pub fn to_options(&self, config: &ResnavConfig) -> FilterOptions {
        let mut settings = config.filter_settings();
        if let Some(mode) = self.mode {
            settings.filter_mode = mode.into();
        }
        if self.case_sensitive {
            settings.filter_case_sensitive = true;
        }
        if self.no_path {
            settings.filter_include_path = false;
        }

        FilterOptions::builder()
            .query(self.query.clone().unwrap_or_default())
            .regex(self.regex)
            .types(self.types.iter().copied().map(ResourceType::from).collect())
            .extensions(&self.extensions)
            .tags(self.tags.clone())
            .sort_by(self.sort.map_or(config.default_sort, SortBy::from))
            .settings(settings)
            .build()
    }
}

/// Output destination for commands that produce a library
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the result here instead of back to the library file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "resnav")]
#[command(about = "Navigate, filter and merge resource libraries", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug details to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List resources matching the filters
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        lib: LibArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show resources matching the filters as a folder outline
    Tree {
        #[command(flatten)]
        lib: LibArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Merge another library's tags and resources into a library
    Merge {
        /// JSON file with the resources and tags to merge in
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        #[command(flatten)]
        lib: LibArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Import resources from `title, path[, tag|tag]` lines or a path listing
    Import {
        /// Text file to read, one resource per line
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// FILE lists file paths (as printed by `find`) instead of resource lines
        #[arg(short = 'p', long = "paths")]
        paths: bool,

        /// With --paths, keep files nested more than one folder deep
        #[arg(short = 'R', long = "recursive", requires = "paths")]
        recursive: bool,

        #[command(flatten)]
        lib: LibArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Turn a library backup into a clean library file
    Restore {
        /// Backup JSON to read
        #[arg(value_name = "BACKUP")]
        backup: PathBuf,

        /// Library file to write
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// List the extensions of local files in a library
    #[command(visible_alias = "ext")]
    Extensions {
        #[command(flatten)]
        lib: LibArgs,
    },

    /// List a library's tags with their usage
    Tags {
        #[command(flatten)]
        lib: LibArgs,
    },

    /// Manage named library files
    Lib {
        #[command(subcommand)]
        command: LibCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibCommands {
    /// Register a library file under a name
    Add {
        /// Name of the library
        name: String,

        /// Path to the library JSON file
        path: PathBuf,
    },

    /// List registered libraries
    List,

    /// Forget a library name (the file is kept)
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the library to forget
        name: String,
    },

    /// Set the default library
    #[command(name = "set-default")]
    SetDefault {
        /// Name of the library to use by default
        name: String,
    },
}

impl Commands {
    /// The `--lib` argument of a library command
    #[must_use]
    pub fn get_lib(&self) -> Option<&str> {
        match self {
            Self::List { lib, .. }
            | Self::Tree { lib, .. }
            | Self::Merge { lib, .. }
            | Self::Import { lib, .. }
            | Self::Extensions { lib }
            | Self::Tags { lib } => lib.lib.as_deref(),
            Self::Restore { .. } | Self::Lib { .. } => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command to execute, defaulting to an unfiltered `list`
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            lib: LibArgs::default(),
            filter: FilterArgs::default(),
        })
    }
}
