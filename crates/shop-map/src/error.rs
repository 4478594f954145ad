//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Header is not part of the catalog.
    UnknownHeader(String),
    /// Column not found in the uploaded data.
    ColumnNotFound(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHeader(h) => write!(f, "Unknown canonical header: {h}"),
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
        }
    }
}

impl std::error::Error for MappingError {}
