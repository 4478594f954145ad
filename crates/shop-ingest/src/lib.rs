//! Product upload ingestion.
//!
//! Turns an uploaded comma-separated file into the uploaded column list and
//! one [`RawRow`](shop_model::RawRow) per non-empty data record.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use shop_ingest::read_csv_upload;
//!
//! let upload = read_csv_upload(Path::new("products.csv"))?;
//! println!("{} columns, {} rows", upload.columns.len(), upload.rows.len());
//! ```

mod error;
mod hints;
mod upload;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use upload::{CsvUpload, parse_csv_str, read_csv_upload};

// === Column Hints ===
pub use hints::{ColumnHint, build_column_hints, sample_values};
