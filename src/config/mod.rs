//! Configuration module for resnav
//!
//! Manages application configuration: named library files and the default
//! filter preferences. Configuration is stored in the user's config directory
//! (`~/.config/resnav/config.toml` on Linux).

use crate::filter::{FilterSettings, MatchMode, SortBy};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResnavConfig {
    /// Map of library names to their JSON files
    #[serde(default)]
    pub libraries: HashMap<String, PathBuf>,

    /// The library to use when none is specified
    #[serde(default)]
    pub default_library: Option<String>,

    /// How multiple selected tags combine
    #[serde(default)]
    pub filter_mode: MatchMode,

    /// Match the search query case-sensitively
    #[serde(default)]
    pub filter_case_sensitive: bool,

    /// Match the search query against paths as well as titles
    #[serde(default = "default_true")]
    pub filter_include_path: bool,

    /// Sort order used when none is given
    #[serde(default)]
    pub default_sort: SortBy,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for ResnavConfig {
    fn default() -> Self {
        Self {
            libraries: HashMap::new(),
            default_library: None,
            filter_mode: MatchMode::And,
            filter_case_sensitive: false,
            filter_include_path: true,
            default_sort: SortBy::UpdatedAt,
            quiet: false,
        }
    }
}

impl ResnavConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("resnav").join("config.toml"))
    }

    /// Load configuration from the user's config file, creating a default one if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it with defaults if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the user's config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Filter preferences to thread into the pipeline
    #[must_use]
    pub const fn filter_settings(&self) -> FilterSettings {
        FilterSettings {
            filter_mode: self.filter_mode,
            filter_case_sensitive: self.filter_case_sensitive,
            filter_include_path: self.filter_include_path,
        }
    }

    /// Register a library file under a name
    pub fn add_library(&mut self, name: String, path: PathBuf) {
        self.libraries.insert(name, path);
    }

    /// Forget a library name, returning its path
    pub fn remove_library(&mut self, name: &str) -> Option<PathBuf> {
        let removed = self.libraries.remove(name);
        if removed.is_some() && self.default_library.as_deref() == Some(name) {
            self.default_library = None;
        }
        removed
    }

    /// Set the default library
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no library is registered under `name`.
    pub fn set_default_library(&mut self, name: String) -> Result<(), ConfigError> {
        if !self.libraries.contains_key(&name) {
            return Err(ConfigError::Message(format!(
                "Library '{name}' does not exist in configuration"
            )));
        }
        self.default_library = Some(name);
        Ok(())
    }

    /// Resolve a command-line library argument
    ///
    /// A registered name wins over a path; with no argument the default library
    /// is used.
    #[must_use]
    pub fn resolve_library(&self, arg: Option<&str>) -> Option<PathBuf> {
        match arg {
            Some(name_or_path) => Some(
                self.libraries
                    .get(name_or_path)
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(name_or_path)),
            ),
            None => self
                .default_library
                .as_ref()
                .and_then(|name| self.libraries.get(name))
                .cloned(),
        }
    }
}
