//! Export file naming.

use shop_model::ExportFormat;

/// File stem used when no usable name is supplied.
pub const DEFAULT_EXPORT_NAME: &str = "products_export";

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Cleans a user-supplied file stem.
///
/// Trims whitespace, replaces path separators and reserved or control
/// characters with `_`, and drops a trailing extension matching `format`.
/// Returns `None` when nothing usable remains.
pub fn sanitize_file_stem(name: &str, format: ExportFormat) -> Option<String> {
    let mut stem = name.trim();
    if let Some((head, ext)) = stem.rsplit_once('.')
        && ext.eq_ignore_ascii_case(format.extension())
    {
        stem = head.trim_end();
    }
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return None;
    }
    Some(cleaned)
}

/// Full export file name: sanitized stem or the default, plus extension.
///
/// - `Some("spring sale")`, CSV → `spring sale.csv`
/// - `Some("q3/prices.json")`, JSON → `q3_prices.json`
/// - `None` or blank → `products_export.<ext>`
pub fn export_file_name(name: Option<&str>, format: ExportFormat) -> String {
    let stem = name
        .and_then(|n| sanitize_file_stem(n, format))
        .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string());
    format!("{stem}.{}", format.extension())
}
