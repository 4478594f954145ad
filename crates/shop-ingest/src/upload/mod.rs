//! CSV upload reading.

mod header;
mod reader;

pub use reader::{CsvUpload, parse_csv_str, read_csv_upload};
