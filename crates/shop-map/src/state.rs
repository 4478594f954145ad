//! Mapping state for an upload under review.
//!
//! Starts from the engine's automatic mapping and records user overrides.
//! Overrides are authoritative: nothing is re-scored after an override, and
//! clearing a column leaves it unmapped rather than restoring the automatic
//! choice.

use std::collections::{BTreeMap, BTreeSet};

use shop_model::{HeaderCatalog, HeaderMap};
use tracing::{debug, warn};

use crate::engine::{ColumnSuggestions, MappingEngine};
use crate::error::MappingError;
use crate::score::Suggestion;

/// Origin of a column's current mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStatus {
    /// Mapped by the engine.
    Auto,
    /// Mapped or cleared by the user.
    Manual,
    /// No header assigned.
    Unmapped,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Number of distinct uploaded columns.
    pub total_columns: usize,
    /// Columns with a header assigned.
    pub mapped: usize,
    /// Columns whose mapping came from the user.
    pub manual: usize,
    /// Catalog headers.
    pub total_headers: usize,
    /// Catalog headers fed by at least one column.
    pub headers_filled: usize,
}

/// State of the mapping for one upload.
#[derive(Debug, Clone)]
pub struct MappingState {
    catalog: HeaderCatalog,
    header_map: HeaderMap,
    suggestions: Vec<ColumnSuggestions>,
    overridden: BTreeSet<String>,
}

impl MappingState {
    /// Create a new mapping state by running the mapping engine.
    pub fn from_columns<S: AsRef<str>>(engine: &MappingEngine, columns: &[S]) -> Self {
        let result = engine.auto_map(columns);
        Self {
            catalog: engine.catalog().clone(),
            header_map: result.header_map,
            suggestions: result.suggestions,
            overridden: BTreeSet::new(),
        }
    }

    pub fn catalog(&self) -> &HeaderCatalog {
        &self.catalog
    }

    /// Current translation table.
    pub fn header_map(&self) -> &HeaderMap {
        &self.header_map
    }

    pub fn suggestions(&self) -> &[ColumnSuggestions] {
        &self.suggestions
    }

    /// Engine suggestions for a column.
    pub fn suggestions_for(&self, column: &str) -> &[Suggestion] {
        self.suggestions
            .iter()
            .find(|s| s.column == column)
            .map_or(&[], |s| s.suggestions.as_slice())
    }

    /// Assigns a header to a column, replacing any earlier mapping.
    ///
    /// The header is matched case-insensitively against the catalog and
    /// stored with its catalog spelling. An empty header clears the column.
    pub fn set_override(&mut self, column: &str, header: &str) -> Result<(), MappingError> {
        if !self.header_map.contains_column(column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        if header.trim().is_empty() {
            return self.clear(column);
        }
        let resolved = self
            .catalog
            .resolve(header)
            .ok_or_else(|| MappingError::UnknownHeader(header.to_string()))?
            .to_string();
        if let Some(existing) = self.header_map.source_for(&resolved)
            && existing != column
        {
            warn!(
                column,
                header = %resolved,
                existing,
                "header already mapped from another column; the first column in upload order is used"
            );
        }
        debug!(column, header = %resolved, "mapping override");
        self.header_map.set(column, resolved);
        self.overridden.insert(column.to_string());
        Ok(())
    }

    /// Unmaps a column. The engine's choice is not restored.
    pub fn clear(&mut self, column: &str) -> Result<(), MappingError> {
        if !self.header_map.clear(column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        self.overridden.insert(column.to_string());
        Ok(())
    }

    pub fn status(&self, column: &str) -> ColumnStatus {
        match self.header_map.target(column) {
            None => ColumnStatus::Unmapped,
            Some(_) if self.overridden.contains(column) => ColumnStatus::Manual,
            Some(_) => ColumnStatus::Auto,
        }
    }

    /// Columns without a header, in upload order.
    pub fn unmapped_columns(&self) -> Vec<&str> {
        self.header_map
            .iter()
            .filter(|(_, header)| header.is_empty())
            .map(|(column, _)| column)
            .collect()
    }

    /// Catalog headers no column feeds, in catalog order.
    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.catalog
            .iter()
            .filter(|header| self.header_map.source_for(header).is_none())
            .collect()
    }

    /// Headers fed by more than one column, with every column in upload order.
    ///
    /// Only the first column is used on export.
    pub fn conflicts(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut sources: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (column, header) in self.header_map.iter() {
            if !header.is_empty() {
                sources.entry(header).or_default().push(column);
            }
        }
        sources.retain(|_, columns| columns.len() > 1);
        sources
    }

    /// Get summary counts.
    pub fn summary(&self) -> MappingSummary {
        let mapped = self
            .header_map
            .iter()
            .filter(|(_, header)| !header.is_empty())
            .count();
        let manual = self
            .header_map
            .iter()
            .filter(|(column, header)| !header.is_empty() && self.overridden.contains(*column))
            .count();
        MappingSummary {
            total_columns: self.header_map.len(),
            mapped,
            manual,
            total_headers: self.catalog.len(),
            headers_filled: self.catalog.len() - self.unmapped_headers().len(),
        }
    }
}
