//! Resnav - a resource library with tree navigation, filtering and merging
//!
//! This library provides the data model for a personal library of resources
//! (local files, folders, URLs, cloud links and text notes) organized by tags,
//! plus the three engines that drive it: the path tree builder, the
//! filter/sort pipeline and the library merge reconciler.

use thiserror::Error;

pub mod audit;
pub mod cli;
pub mod config;
pub mod filter;
pub mod import;
pub mod merge;
pub mod model;
pub mod output;
pub mod tree;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ResnavError {
    /// Library edit error
    #[error("Library error: {0}")]
    LibraryError(#[from] model::LibraryError),
    /// Import or restore parse error
    #[error("Import error: {0}")]
    ImportError(#[from] import::ImportError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Library JSON could not be written or read
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
