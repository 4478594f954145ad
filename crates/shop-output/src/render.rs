//! CSV and JSON rendering of canonical records.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use shop_model::{CanonicalRecord, ExportFormat, HeaderCatalog};
use tracing::info;

use crate::common::export_file_name;
use crate::error::{OutputError, Result};

/// Renders records as CSV text.
///
/// The first row is the catalog. Every field is quoted, embedded quotes are
/// doubled and rows end with CRLF. Columns follow the catalog; headers a
/// record lacks are written empty.
pub fn render_csv(catalog: &HeaderCatalog, records: &[CanonicalRecord]) -> Result<String> {
    if records.is_empty() {
        return Err(OutputError::EmptyExport);
    }
    let mut bytes = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(&mut bytes);
        writer.write_record(catalog.iter())?;
        for record in records {
            writer.write_record(catalog.iter().map(|header| record.get(header).unwrap_or("")))?;
        }
        writer.flush().map_err(OutputError::Buffer)?;
    }
    String::from_utf8(bytes)
        .map_err(|err| OutputError::Buffer(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Renders records as a pretty-printed JSON array.
///
/// Each object carries exactly the catalog headers, in catalog order.
pub fn render_json(catalog: &HeaderCatalog, records: &[CanonicalRecord]) -> Result<String> {
    if records.is_empty() {
        return Err(OutputError::EmptyExport);
    }
    let projected: Vec<CanonicalRecord> = records
        .iter()
        .map(|record| {
            let mut object = CanonicalRecord::with_capacity(catalog.len());
            for header in catalog.iter() {
                object.push(header, record.get(header).unwrap_or(""));
            }
            object
        })
        .collect();
    Ok(serde_json::to_string_pretty(&projected)?)
}

/// Renders records in the requested format.
pub fn render(
    format: ExportFormat,
    catalog: &HeaderCatalog,
    records: &[CanonicalRecord],
) -> Result<String> {
    match format {
        ExportFormat::Csv => render_csv(catalog, records),
        ExportFormat::Json => render_json(catalog, records),
    }
}

/// Renders records and writes them under `dir`.
///
/// The directory is created if needed. Nothing touches the filesystem when
/// there are no records. Returns the path of the written file.
pub fn write_export(
    dir: &Path,
    name: Option<&str>,
    format: ExportFormat,
    catalog: &HeaderCatalog,
    records: &[CanonicalRecord],
) -> Result<PathBuf> {
    let contents = render(format, catalog, records)?;
    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_file_name(name, format));
    fs::write(&path, &contents).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        format = %format,
        records = records.len(),
        bytes = contents.len(),
        "export written"
    );
    Ok(path)
}
