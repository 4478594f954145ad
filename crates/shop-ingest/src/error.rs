//! Error types for upload ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that reject an uploaded file.
///
/// Every variant is an input-format problem: the upload is discarded and the
/// user may retry with another file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Upload file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not a tabular text format.
    #[error("unsupported file type {path}: expected a .csv or .txt file")]
    UnsupportedFileType { path: PathBuf },

    /// UTF-16 input is not supported.
    #[error("unsupported encoding {encoding}: save the file as UTF-8")]
    UnsupportedEncoding { encoding: &'static str },

    /// Content is not parseable as CSV.
    #[error("failed to parse CSV: {message}")]
    CsvParse { message: String },

    /// File is empty or the header row has no names.
    #[error("missing header row: the first line must name the columns")]
    MissingHeader,

    /// Header present but only blank lines follow.
    #[error("no data rows found below the header")]
    NoDataRows,
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::CsvParse {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");
        assert_eq!(
            IngestError::NoDataRows.to_string(),
            "no data rows found below the header"
        );
    }
}
