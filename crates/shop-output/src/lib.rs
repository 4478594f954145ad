//! Product export generation.
//!
//! This crate renders canonical records in the download formats:
//!
//! - **CSV**: catalog header row, every field quoted, CRLF line endings
//! - **JSON**: array of flat objects keyed in catalog order, 2-space indent
//!
//! Empty exports are rejected before any bytes are produced.

mod common;
mod error;
mod render;

pub use common::{DEFAULT_EXPORT_NAME, export_file_name, sanitize_file_stem};
pub use error::{OutputError, Result};
pub use render::{render, render_csv, render_json, write_export};
