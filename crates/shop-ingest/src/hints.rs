//! Column hints and sample value extraction.

use std::collections::BTreeSet;

use crate::upload::CsvUpload;

/// Summary of one uploaded column, shown next to mapping suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHint {
    pub column: String,
    /// True if every non-empty value looks like a number or a price.
    pub is_numeric: bool,
    /// Ratio of unique values among non-empty values (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of empty values to total rows (0.0 to 1.0).
    pub null_ratio: f64,
}

/// Builds one hint per uploaded column, in column order.
pub fn build_column_hints(upload: &CsvUpload) -> Vec<ColumnHint> {
    let total = upload.rows.len();
    upload
        .columns
        .iter()
        .map(|column| {
            let mut non_null = 0usize;
            let mut numeric = 0usize;
            let mut uniques = BTreeSet::new();
            for value in upload.column_values(column) {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    continue;
                }
                non_null += 1;
                uniques.insert(trimmed);
                if looks_numeric(trimmed) {
                    numeric += 1;
                }
            }
            let null_ratio = if total == 0 {
                1.0
            } else {
                (total - non_null) as f64 / total as f64
            };
            let unique_ratio = if non_null == 0 {
                0.0
            } else {
                uniques.len() as f64 / non_null as f64
            };
            ColumnHint {
                column: column.clone(),
                is_numeric: non_null > 0 && numeric == non_null,
                unique_ratio,
                null_ratio,
            }
        })
        .collect()
}

/// First `limit` distinct non-empty values of a column.
pub fn sample_values<'a>(upload: &'a CsvUpload, column: &'a str, limit: usize) -> Vec<&'a str> {
    let mut samples: Vec<&str> = Vec::with_capacity(limit);
    for value in upload.column_values(column) {
        if samples.len() >= limit {
            break;
        }
        let trimmed = value.trim();
        if !trimmed.is_empty() && !samples.contains(&trimmed) {
            samples.push(trimmed);
        }
    }
    samples
}

fn looks_numeric(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
        && value.chars().all(|c| {
            c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+' | ' ' | '$' | '€' | '£' | '¥')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_csv_str;

    #[test]
    fn test_hints_detect_prices() {
        let upload = parse_csv_str("Name,Cost,Notes\nA,$10.00,\nB,\"1,200\",x\nA,3,\n").unwrap();
        let hints = build_column_hints(&upload);

        assert_eq!(hints.len(), 3);
        let cost = &hints[1];
        assert_eq!(cost.column, "Cost");
        assert!(cost.is_numeric);
        assert!((cost.unique_ratio - 1.0).abs() < 1e-6);

        let name = &hints[0];
        assert!(!name.is_numeric);
        assert!((name.unique_ratio - 2.0 / 3.0).abs() < 1e-6);

        let notes = &hints[2];
        assert!((notes.null_ratio - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_values_are_distinct() {
        let upload = parse_csv_str("Name\nA\nA\n\nB\nC\n").unwrap();
        assert_eq!(sample_values(&upload, "Name", 2), vec!["A", "B"]);
        assert!(sample_values(&upload, "Missing", 3).is_empty());
    }
}
