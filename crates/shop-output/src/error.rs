//! Error types for export rendering.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing an export.
#[derive(Debug, Error)]
pub enum OutputError {
    /// No records to export.
    #[error("nothing to export: no records selected")]
    EmptyExport,

    /// Writing the export file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CSV encoding failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The in-memory buffer could not be finalized.
    #[error("failed to finalize export buffer: {0}")]
    Buffer(#[source] io::Error),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
