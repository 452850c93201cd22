//! Error types for schema rollout.

use std::path::PathBuf;

use oxide_ddl::TranslateError;

/// Errors that can occur while rolling a schema out.
#[derive(Debug, thiserror::Error)]
pub enum RollError {
    /// SQL could not be rendered.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// Database error during introspection or execution.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error reading an input file.
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// An input file is not valid JSON for the expected shape.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Result type for rollout operations.
pub type Result<T> = std::result::Result<T, RollError>;
