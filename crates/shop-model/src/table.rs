//! Row and mapping containers.
//!
//! All three types are ordered association lists rather than hash maps.
//! Iteration order is part of their contract: the record transformer relies
//! on [`HeaderMap`] upload order to pick the first column mapped to a header,
//! and exports rely on [`CanonicalRecord`] catalog order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One uploaded input record: uploaded column name to cell value.
///
/// Inserting a column that already exists replaces its value in place, so a
/// duplicated upload column keeps the last value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<C, V> FromIterator<(C, V)> for RawRow
where
    C: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (C, V)>>(iter: T) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// Translation table from uploaded column names to canonical headers.
///
/// An empty target means the column is unmapped. Entries keep upload order;
/// re-assigning a column updates it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every column as unmapped, in the given order.
    pub fn unmapped<'a, I>(columns: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Self::new();
        for column in columns {
            map.set(column, "");
        }
        map
    }

    pub fn set(&mut self, column: impl Into<String>, header: impl Into<String>) {
        let column = column.into();
        let header = header.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = header,
            None => self.entries.push((column, header)),
        }
    }

    /// Marks a column as unmapped. Returns false if the column is unknown.
    pub fn clear(&mut self, column: &str) -> bool {
        match self.entries.iter_mut().find(|(c, _)| c == column) {
            Some(entry) => {
                entry.1.clear();
                true
            }
            None => false,
        }
    }

    /// Canonical header for a column, or `None` when absent or unmapped.
    pub fn target(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, h)| h.as_str())
            .filter(|h| !h.is_empty())
    }

    /// First column (in upload order) mapped to `header`.
    pub fn source_for(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, h)| !h.is_empty() && h == header)
            .map(|(c, _)| c.as_str())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, h)| (c.as_str(), h.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One exported record keyed by canonical header, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalRecord {
    fields: Vec<(String, String)>,
}

impl CanonicalRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.push((header.into(), value.into()));
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(h, _)| h.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (header, value) in &self.fields {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_row_last_duplicate_wins() {
        let row: RawRow = [("Name", "first"), ("Cost", "1"), ("Name", "second")]
            .into_iter()
            .collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Name"), Some("second"));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["Name", "Cost"]);
    }

    #[test]
    fn header_map_first_source_wins() {
        let mut map = HeaderMap::unmapped(["Cost", "Price", "Name"]);
        map.set("Price", "Regular price");
        map.set("Cost", "Regular price");
        assert_eq!(map.source_for("Regular price"), Some("Cost"));
        assert_eq!(map.target("Name"), None);
        assert!(map.clear("Cost"));
        assert_eq!(map.source_for("Regular price"), Some("Price"));
        assert!(!map.clear("Missing"));
    }

    #[test]
    fn canonical_record_serializes_in_order() {
        let mut record = CanonicalRecord::default();
        record.push("Z", "1");
        record.push("A", "2");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Z":"1","A":"2"}"#);
    }
}
