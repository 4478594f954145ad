//! Mapping engine implementation.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use shop_model::{HeaderCatalog, HeaderMap};
use tracing::debug;

use crate::score::{
    AUTO_MAP_MIN_SCORE, MAX_SUGGESTIONS, MatchScore, SUGGESTION_MIN_SCORE, Suggestion, score,
};

/// Top suggestions for one uploaded column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSuggestions {
    pub column: String,
    pub suggestions: Vec<Suggestion>,
}

/// Result of automatic mapping over an upload's columns.
#[derive(Debug, Clone)]
pub struct MappingResult {
    /// Initial translation table, one entry per distinct column.
    pub header_map: HeaderMap,
    /// Suggestions per column, in column order.
    pub suggestions: Vec<ColumnSuggestions>,
    /// Columns left unmapped.
    pub unmapped_columns: Vec<String>,
}

impl MappingResult {
    /// Number of columns that received a header.
    pub fn mapped_count(&self) -> usize {
        self.header_map.len() - self.unmapped_columns.len()
    }

    /// Suggestions for one column.
    pub fn suggestions_for(&self, column: &str) -> &[Suggestion] {
        self.suggestions
            .iter()
            .find(|s| s.column == column)
            .map_or(&[], |s| s.suggestions.as_slice())
    }
}

/// Suggests and auto-assigns canonical headers for uploaded columns.
#[derive(Debug, Clone)]
pub struct MappingEngine {
    catalog: HeaderCatalog,
    min_auto_score: f64,
}

impl MappingEngine {
    /// Create a new engine over a catalog with the default auto-map threshold.
    pub fn new(catalog: HeaderCatalog) -> Self {
        Self {
            catalog,
            min_auto_score: AUTO_MAP_MIN_SCORE,
        }
    }

    /// Override the minimum score required for automatic mapping.
    #[must_use]
    pub fn with_min_auto_score(mut self, min_auto_score: f64) -> Self {
        self.min_auto_score = min_auto_score;
        self
    }

    pub fn catalog(&self) -> &HeaderCatalog {
        &self.catalog
    }

    pub fn min_auto_score(&self) -> f64 {
        self.min_auto_score
    }

    /// Score a single column against a specific header.
    ///
    /// Returns `None` if the header is not in the catalog.
    pub fn score(&self, column: &str, header: &str) -> Option<MatchScore> {
        self.catalog
            .contains(header)
            .then(|| score(column, header))
    }

    /// Up to three headers scoring above the suggestion floor, best first.
    ///
    /// Ties keep catalog order.
    pub fn suggest(&self, column: &str) -> Vec<Suggestion> {
        let mut candidates = self.ranked(column);
        candidates.truncate(MAX_SUGGESTIONS);
        candidates
    }

    /// Every header scoring above the suggestion floor, best first.
    fn ranked(&self, column: &str) -> Vec<Suggestion> {
        let mut candidates: Vec<Suggestion> = self
            .catalog
            .iter()
            .filter_map(|header| {
                let s = score(column, header);
                (s.score > SUGGESTION_MIN_SCORE).then(|| Suggestion {
                    header: header.to_string(),
                    score: s.score,
                    kind: s.kind,
                })
            })
            .collect();
        // Stable sort: equal scores stay in catalog order.
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates
    }

    /// Builds the initial header map for an upload.
    ///
    /// Columns are processed in upload order. Each column takes its best
    /// candidate at or above the auto-map threshold that no earlier column
    /// has claimed; otherwise it stays unmapped. Candidates beyond the top
    /// three suggestions are still eligible. Repeated column names are only
    /// considered once.
    pub fn auto_map<S: AsRef<str>>(&self, columns: &[S]) -> MappingResult {
        let mut header_map = HeaderMap::new();
        let mut suggestions = Vec::new();
        let mut unmapped_columns = Vec::new();
        let mut claimed: BTreeSet<String> = BTreeSet::new();

        for column in columns {
            let column = column.as_ref();
            if header_map.contains_column(column) {
                continue;
            }
            let mut column_suggestions = self.ranked(column);
            let choice = column_suggestions
                .iter()
                .find(|s| s.score >= self.min_auto_score && !claimed.contains(&s.header))
                .cloned();
            match choice {
                Some(choice) => {
                    debug!(
                        column,
                        header = %choice.header,
                        score = choice.score,
                        kind = %choice.kind,
                        "auto-mapped column"
                    );
                    claimed.insert(choice.header.clone());
                    header_map.set(column, choice.header);
                }
                None => {
                    header_map.set(column, "");
                    unmapped_columns.push(column.to_string());
                }
            }
            column_suggestions.truncate(MAX_SUGGESTIONS);
            suggestions.push(ColumnSuggestions {
                column: column.to_string(),
                suggestions: column_suggestions,
            });
        }

        debug!(
            columns = header_map.len(),
            unmapped = unmapped_columns.len(),
            "auto-mapping complete"
        );
        MappingResult {
            header_map,
            suggestions,
            unmapped_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MatchKind;

    fn engine() -> MappingEngine {
        MappingEngine::new(HeaderCatalog::default())
    }

    #[test]
    fn test_suggest_returns_top_three_best_first() {
        let suggestions = engine().suggest("price");
        let headers: Vec<&str> = suggestions.iter().map(|s| s.header.as_str()).collect();
        // Four headers contain "price"; equal scores keep catalog order.
        assert_eq!(
            headers,
            vec!["Date sale price starts", "Date sale price ends", "Sale price"]
        );

        let suggestions = engine().suggest("Regular price");
        assert_eq!(suggestions[0].header, "Regular price");
        assert_eq!(suggestions[0].kind, MatchKind::Exact);
        assert_eq!(suggestions[1].header, "Sale price");
        assert!((suggestions[1].score - 30.0).abs() < 1e-9);
        assert!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_suggest_filters_low_scores() {
        assert!(engine().suggest("Cost").is_empty());
        assert!(engine().suggest("").is_empty());
    }

    #[test]
    fn test_score_unknown_header() {
        assert!(engine().score("Name", "Not a header").is_none());
        assert_eq!(
            engine().score("name", "Name").map(|s| s.kind),
            Some(MatchKind::Exact)
        );
    }

    #[test]
    fn test_auto_map_first_column_claims_header() {
        let result = engine().auto_map(&["Weight (kg)", "weight", "Cost"]);
        let map = &result.header_map;
        assert_eq!(map.target("Weight (kg)"), Some("Weight (kg)"));
        // The only candidate is already claimed by the earlier column.
        assert_eq!(map.target("weight"), None);
        assert_eq!(map.target("Cost"), None);
        assert_eq!(result.unmapped_columns, vec!["weight", "Cost"]);
        assert_eq!(result.mapped_count(), 1);
    }

    #[test]
    fn test_auto_map_falls_back_to_next_unclaimed() {
        let result = engine().auto_map(&["Attribute 1 name", "attribute"]);
        assert_eq!(
            result.header_map.target("attribute"),
            Some("Attribute 1 value(s)")
        );
    }

    #[test]
    fn test_auto_map_looks_past_displayed_suggestions() {
        let columns = [
            "Date sale price starts",
            "Date sale price ends",
            "Sale price",
            "price",
        ];
        let result = engine().auto_map(&columns);
        // All three displayed candidates for "price" are claimed; the fourth qualifies.
        assert_eq!(result.header_map.target("price"), Some("Regular price"));
        assert_eq!(result.header_map.source_for("Regular price"), Some("price"));
        assert_eq!(result.suggestions_for("price").len(), MAX_SUGGESTIONS);
        assert!(result.unmapped_columns.is_empty());
    }

    #[test]
    fn test_auto_map_threshold() {
        let strict = engine().with_min_auto_score(90.0);
        let result = strict.auto_map(&["Product Name", "sku"]);
        assert_eq!(result.header_map.target("Product Name"), None);
        assert_eq!(result.header_map.target("sku"), Some("SKU"));
        assert_eq!(result.suggestions_for("Product Name")[0].header, "Name");
    }

    #[test]
    fn test_auto_map_ignores_repeated_columns() {
        let result = engine().auto_map(&["Name", "Name"]);
        assert_eq!(result.header_map.len(), 1);
        assert_eq!(result.suggestions.len(), 1);
    }
}
