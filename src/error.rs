//! Error types for loading, building and writing branch trees.

use crate::types::ProjectId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for every phase of a run.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}: CSV error: {message}")]
    Csv { source_name: String, message: String },

    #[error("{source_name}: row {row}: {failure}")]
    Parse {
        source_name: String,
        row: usize,
        failure: ParseFailure,
    },

    #[error("{source_name}: row {row}: expected at least {expected} columns, found {found}")]
    Schema {
        source_name: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Project not found: {project_id} (referenced by edge row {edge_row})")]
    MissingProject { project_id: ProjectId, edge_row: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// What went wrong with a row that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("column {column} is not an integer: {value:?}")]
    NotAnInteger { column: &'static str, value: String },

    #[error("expected at least {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },
}

impl TreeError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreeError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a CSV reader or writer error with the source it happened on.
    pub fn csv(source_name: impl Into<String>, e: csv::Error) -> Self {
        TreeError::Csv {
            source_name: source_name.into(),
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(e: serde_json::Error) -> Self {
        TreeError::Serialization(e.to_string())
    }
}

/// Result type for branch tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
