//! Scoring of uploaded column names against canonical headers.
//!
//! Both names are normalized (trimmed, lowercased) first. An exact match
//! scores [`EXACT_SCORE`]; otherwise containment in either direction scores
//! [`CONTAINS_SCORE`]; otherwise the names are split into words and scored by
//! the share of uploaded words that overlap a canonical word, scaled by
//! [`WORD_OVERLAP_WEIGHT`]. Two words overlap when either contains the other.

use std::fmt;

use serde::Serialize;

use crate::utils::{normalize_text, tokenize};

pub const EXACT_SCORE: f64 = 100.0;
pub const CONTAINS_SCORE: f64 = 80.0;
pub const WORD_OVERLAP_WEIGHT: f64 = 60.0;
/// Candidates must score strictly above this to be suggested.
pub const SUGGESTION_MIN_SCORE: f64 = 10.0;
pub const MAX_SUGGESTIONS: usize = 3;
/// Default minimum score for automatic mapping.
pub const AUTO_MAP_MIN_SCORE: f64 = 50.0;

/// How an uploaded name matched a canonical header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    None,
    WordOverlap,
    Contains,
    Exact,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::None => "none",
            MatchKind::WordOverlap => "word overlap",
            MatchKind::Contains => "contains",
            MatchKind::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for a single column-header pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchScore {
    pub kind: MatchKind,
    /// 0 to 100.
    pub score: f64,
}

impl MatchScore {
    const NONE: Self = Self {
        kind: MatchKind::None,
        score: 0.0,
    };
}

/// A suggested canonical header for one uploaded column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub header: String,
    pub score: f64,
    pub kind: MatchKind,
}

/// Scores an uploaded column name against a canonical header.
pub fn score(uploaded: &str, canonical: &str) -> MatchScore {
    let uploaded = normalize_text(uploaded);
    let canonical = normalize_text(canonical);
    if uploaded.is_empty() || canonical.is_empty() {
        return MatchScore::NONE;
    }
    if uploaded == canonical {
        return MatchScore {
            kind: MatchKind::Exact,
            score: EXACT_SCORE,
        };
    }
    if uploaded.contains(&canonical) || canonical.contains(&uploaded) {
        return MatchScore {
            kind: MatchKind::Contains,
            score: CONTAINS_SCORE,
        };
    }

    let uploaded_words = tokenize(&uploaded);
    let canonical_words = tokenize(&canonical);
    let denominator = uploaded_words.len().max(canonical_words.len());
    if denominator == 0 {
        return MatchScore::NONE;
    }
    let matching = uploaded_words
        .iter()
        .filter(|word| {
            canonical_words
                .iter()
                .any(|other| word.contains(other) || other.contains(*word))
        })
        .count();
    if matching == 0 {
        return MatchScore::NONE;
    }
    MatchScore {
        kind: MatchKind::WordOverlap,
        score: matching as f64 / denominator as f64 * WORD_OVERLAP_WEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let s = score("  regular PRICE", "Regular price");
        assert_eq!(s.kind, MatchKind::Exact);
        assert_eq!(s.score, EXACT_SCORE);
    }

    #[test]
    fn test_containment_either_direction() {
        assert_eq!(score("Product Name", "Name").score, CONTAINS_SCORE);
        assert_eq!(score("price", "Sale price").score, CONTAINS_SCORE);
    }

    #[test]
    fn test_word_overlap() {
        // "stock" overlaps "stock"; "qty" does not match "amount" or "low".
        let s = score("stock qty", "Low stock amount");
        assert_eq!(s.kind, MatchKind::WordOverlap);
        assert!((s.score - 20.0).abs() < 1e-9, "got {}", s.score);

        // Word containment counts both ways: "desc" is inside "description".
        let s = score("short_desc", "Short description");
        assert!((s.score - 60.0).abs() < 1e-9, "got {}", s.score);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(score("Cost", "Regular price").kind, MatchKind::None);
        assert_eq!(score("   ", "Name").score, 0.0);
    }
}
