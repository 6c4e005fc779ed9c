//! Error types for tabclean

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Column-level schema problems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The requested column does not exist in the table
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Renaming would produce two columns with the same name
    #[error("column '{0}' already exists")]
    DuplicateColumn(String),
}

/// Errors that can occur while loading, cleaning or exporting tables
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column does not match the row count of the table
    #[error("column '{name}' has {found} cells, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Schema error (missing or duplicate column)
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// CSV error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

