//! Resource filtering, sorting and list navigation
//!
//! Derives the visible resource list from a library's full resource set and
//! the current query. Settings are passed explicitly in [`FilterOptions`];
//! nothing is read from global state.
//!
//! # Examples
//!
//! ```
//! use resnav::filter::{FilterOptions, MatchMode, SortBy, filter_resources};
//! use resnav::model::{Resource, ResourceType};
//!
//! let resources = vec![Resource::new("Manual", ResourceType::LocalFile, "/docs/manual.pdf")];
//! let options = FilterOptions::builder()
//!     .extension("pdf")
//!     .match_mode(MatchMode::Or)
//!     .sort_by(SortBy::Title)
//!     .build();
//!
//! assert_eq!(filter_resources(&resources, &options).len(), 1);
//! ```

pub mod navigation;
pub mod options;
pub mod pipeline;

pub use navigation::{Neighbors, neighbors};
pub use options::{FilterOptions, FilterOptionsBuilder, FilterSettings, MatchMode, SortBy, normalize_extension};
pub use pipeline::{filter_resources, sort_resources};
