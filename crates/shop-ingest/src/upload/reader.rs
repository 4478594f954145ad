//! CSV upload reading with a required header row.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use shop_model::RawRow;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

use super::header::HeaderRow;

/// Extensions accepted as tabular text.
const ACCEPTED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// A parsed upload: the uploaded column names plus one row per data record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvUpload {
    /// Distinct uploaded column names, in file order.
    pub columns: Vec<String>,
    /// Data records in file order, blank lines excluded.
    pub rows: Vec<RawRow>,
}

impl CsvUpload {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column across all rows; absent cells read as empty.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().map(move |row| row.get(column).unwrap_or(""))
    }
}

/// Reads an uploaded file from disk.
///
/// Rejects non-tabular extensions, UTF-16 content, files whose first record
/// is not a header and files without any data record.
pub fn read_csv_upload(path: &Path) -> Result<CsvUpload> {
    check_extension(path)?;
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let upload = parse_csv_bytes(&bytes)?;
    debug!(
        path = %path.display(),
        columns = upload.columns.len(),
        rows = upload.rows.len(),
        "read upload"
    );
    Ok(upload)
}

/// Parses in-memory CSV text with the same rules as [`read_csv_upload`].
pub fn parse_csv_str(text: &str) -> Result<CsvUpload> {
    parse_csv_bytes(text.as_bytes())
}

fn check_extension(path: &Path) -> Result<()> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if accepted {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFileType {
            path: path.to_path_buf(),
        })
    }
}

/// Checks for UTF-16 BOM markers, which are not supported.
fn validate_encoding(bytes: &[u8]) -> Result<()> {
    match bytes.get(0..2) {
        Some([0xFF, 0xFE]) => Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
        }),
        Some([0xFE, 0xFF]) => Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 BE",
        }),
        _ => Ok(()),
    }
}

fn parse_csv_bytes(bytes: &[u8]) -> Result<CsvUpload> {
    validate_encoding(bytes)?;
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut records = reader.records();

    let Some(first) = records.next() else {
        return Err(IngestError::MissingHeader);
    };
    let header = HeaderRow::from_cells(first?.iter());
    if header.is_empty() {
        return Err(IngestError::MissingHeader);
    }
    if header.blank_count() > 0 {
        warn!(
            blank = header.blank_count(),
            "ignoring columns with blank header names"
        );
    }
    if header.duplicate_count() > 0 {
        warn!(
            duplicates = header.duplicate_count(),
            "duplicate column names: the last value in each row wins"
        );
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        let record = record?;
        if is_blank_line(&record, bytes) {
            skipped += 1;
            continue;
        }
        let mut row = RawRow::new();
        for (slot, value) in header.slots.iter().zip(record.iter()) {
            if let Some(column) = slot {
                row.insert(column.as_str(), value);
            }
        }
        rows.push(row);
    }
    if skipped > 0 {
        debug!(skipped, "skipped blank lines");
    }
    if rows.is_empty() {
        return Err(IngestError::NoDataRows);
    }

    Ok(CsvUpload {
        columns: header.columns,
        rows,
    })
}

/// A line with no separator and no quoted cell, only whitespace.
///
/// A record of empty cells (`,,` or `""`) is data, not a blank line.
fn is_blank_line(record: &StringRecord, bytes: &[u8]) -> bool {
    if record.len() != 1 || !record[0].trim().is_empty() {
        return false;
    }
    let line = record
        .position()
        .and_then(|pos| usize::try_from(pos.byte()).ok())
        .and_then(|start| bytes.get(start..))
        .map(|rest| {
            let start = rest
                .iter()
                .position(|b| !matches!(b, b'\r' | b'\n'))
                .unwrap_or(rest.len());
            let rest = &rest[start..];
            let end = rest.iter().position(|b| *b == b'\n').unwrap_or(rest.len());
            &rest[..end]
        })
        .unwrap_or_default();
    !line.contains(&b'"')
}
