//! Error types for the card linter

use std::path::PathBuf;

use thiserror::Error;

/// Result type for linter operations
pub type Result<T> = std::result::Result<T, LintError>;

/// Card linter errors
///
/// These cover the fatal, load-time failure class: a schema document that
/// cannot be read, or one that yields incomplete rule sets. Per-card
/// findings are never errors; they accumulate as [`Diagnostic`]s instead.
///
/// [`Diagnostic`]: crate::lint::Diagnostic
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Schema document not readable at {path}: {source}")]
    SchemaDocument {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Schema document yielded empty rule sets: {}", .missing.join(", "))]
    IncompleteDefinitions { missing: Vec<String> },

    #[error("Card directory not found: {0}")]
    CardDirNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
