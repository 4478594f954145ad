//! Header row normalization.

/// Normalizes a header value: strips a BOM and surrounding whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_matches('\u{feff}').trim().to_string()
}

/// Resolved header row.
///
/// `slots[i]` names the column of the i-th cell, or `None` for a blank header
/// cell whose values are ignored. `columns` lists distinct names in first-seen
/// order.
#[derive(Debug, Clone, Default)]
pub struct HeaderRow {
    pub slots: Vec<Option<String>>,
    pub columns: Vec<String>,
}

impl HeaderRow {
    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut row = Self::default();
        for cell in cells {
            let name = normalize_header(cell);
            if name.is_empty() {
                row.slots.push(None);
                continue;
            }
            if !row.columns.contains(&name) {
                row.columns.push(name.clone());
            }
            row.slots.push(Some(name));
        }
        row
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn blank_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    pub fn duplicate_count(&self) -> usize {
        self.slots.iter().flatten().count() - self.columns.len()
    }
}
