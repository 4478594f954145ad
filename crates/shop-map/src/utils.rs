//! Utility functions for mapping operations.

/// Normalizes text for comparison by trimming and lowercasing.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits normalized text into words on whitespace, hyphens and underscores.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .collect()
}
