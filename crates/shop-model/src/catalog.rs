//! Canonical product header catalog.
//!
//! The catalog is the target schema of every exported record. Its order is
//! the column order of CSV exports and the key order of JSON exports.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Canonical header holding the base price.
pub const REGULAR_PRICE: &str = "Regular price";
/// Canonical header holding the discounted price.
pub const SALE_PRICE: &str = "Sale price";
/// Canonical header holding comma-separated product tags.
pub const TAGS: &str = "Tags";

/// The 41 WooCommerce-style product fields, in export order.
pub const DEFAULT_HEADERS: [&str; 41] = [
    "ID",
    "Type",
    "SKU",
    "Name",
    "Published",
    "Is featured?",
    "Visibility in catalog",
    "Short description",
    "Description",
    "Date sale price starts",
    "Date sale price ends",
    "Tax status",
    "Tax class",
    "In stock?",
    "Stock",
    "Low stock amount",
    "Backorders allowed?",
    "Sold individually?",
    "Weight (kg)",
    "Length (cm)",
    "Width (cm)",
    "Height (cm)",
    "Allow customer reviews?",
    "Purchase note",
    SALE_PRICE,
    REGULAR_PRICE,
    "Categories",
    TAGS,
    "Shipping class",
    "Images",
    "Download limit",
    "Download expiry days",
    "Parent",
    "Grouped products",
    "Upsells",
    "Cross-sells",
    "External URL",
    "Button text",
    "Position",
    "Attribute 1 name",
    "Attribute 1 value(s)",
];

/// Ordered, immutable list of canonical header names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCatalog {
    headers: Vec<String>,
}

impl Default for HeaderCatalog {
    fn default() -> Self {
        Self {
            headers: DEFAULT_HEADERS.iter().map(|h| (*h).to_string()).collect(),
        }
    }
}

impl HeaderCatalog {
    /// Builds a catalog from an explicit header list.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let headers = headers
            .into_iter()
            .map(Into::into)
            .filter(|h: &String| seen.insert(h.clone()))
            .collect();
        Self { headers }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Exact (case-sensitive) membership test.
    pub fn contains(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }

    /// Returns the catalog spelling of `header`, compared case-insensitively.
    pub fn resolve(&self, header: &str) -> Option<&str> {
        let needle = header.trim();
        self.headers
            .iter()
            .find(|h| h.eq_ignore_ascii_case(needle))
            .map(String::as_str)
    }

    /// Returns a catalog without the given headers, preserving order.
    ///
    /// Every disabled name must resolve to a catalog header.
    pub fn without<'a, I>(&self, disabled: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut removed = BTreeSet::new();
        for name in disabled {
            let resolved = self
                .resolve(name)
                .ok_or_else(|| ModelError::UnknownHeader(name.to_string()))?;
            removed.insert(resolved.to_string());
        }
        Ok(Self {
            headers: self
                .headers
                .iter()
                .filter(|h| !removed.contains(*h))
                .cloned()
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_41_unique_headers() {
        let catalog = HeaderCatalog::default();
        assert_eq!(catalog.len(), 41);
        let unique: BTreeSet<_> = catalog.iter().collect();
        assert_eq!(unique.len(), 41);
        assert!(catalog.contains(REGULAR_PRICE));
        assert!(catalog.contains(SALE_PRICE));
        assert!(catalog.contains(TAGS));
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let catalog = HeaderCatalog::default();
        assert_eq!(catalog.resolve("  regular PRICE "), Some(REGULAR_PRICE));
        assert_eq!(catalog.resolve("Cost"), None);
    }

    #[test]
    fn without_preserves_order_and_rejects_unknown() {
        let catalog = HeaderCatalog::new(["A", "B", "C"]);
        let trimmed = catalog.without(["b"]).unwrap();
        assert_eq!(trimmed.headers(), ["A", "C"]);

        let err = catalog.without(["Z"]).unwrap_err();
        assert_eq!(err, ModelError::UnknownHeader("Z".to_string()));
    }

    #[test]
    fn new_drops_duplicates() {
        let catalog = HeaderCatalog::new(["A", "B", "A"]);
        assert_eq!(catalog.headers(), ["A", "B"]);
    }
}
