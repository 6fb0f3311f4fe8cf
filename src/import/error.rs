//! Import error types
//!
//! These are the caller-side parse failures around a merge or restore, such
//! as pasted text that is not JSON. The merge engine itself never fails.

use thiserror::Error;

/// Errors raised while reading import data
#[derive(Debug, Error)]
pub enum ImportError {
    /// The text is not valid JSON or does not fit the expected shape
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON value is valid but not an object
    #[error("Invalid library data: expected a JSON object")]
    NotAnObject,

    /// A delimited line could not be read
    #[error("Invalid delimited text: {0}")]
    Csv(#[from] csv::Error),
}
