use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a dataset from being loaded at all.
///
/// Bad cells are not errors: they become missing values and, for the
/// stream count, cause the row to be skipped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level array of objects")]
    NotRecords,

    #[error("file has no header row")]
    Empty,

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
