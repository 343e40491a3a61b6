//! Error types for dataset comparison

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a comparison run
#[derive(Debug, Error)]
pub enum CompareError {
    /// An identifier column is missing from one of the inputs
    #[error("identifier column '{column}' not found in {source_path}")]
    MissingIdentifier { column: String, source_path: String },

    /// The two inputs share no column that can be compared
    #[error("no shared columns to compare between {source_a} and {source_b}")]
    NoSharedColumns { source_a: String, source_b: String },

    /// Invalid configuration (unknown format tag, empty key list, missing sheet)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A delimited record has more fields than its header
    #[error("{path}: row {line} has {fields} fields but the header has {columns}")]
    RowTooLong {
        path: PathBuf,
        line: usize,
        fields: usize,
        columns: usize,
    },

    #[error("Excel error on {path}: {message}")]
    Excel { path: PathBuf, message: String },

    #[error("failed to render unique rows: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompareError {
    /// True for the schema class of failures (bad identifier columns, nothing to compare)
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            CompareError::MissingIdentifier { .. } | CompareError::NoSharedColumns { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompareError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        CompareError::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
