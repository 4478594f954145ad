use serde::{Deserialize, Serialize};

/// Session-wide pricing knobs applied to every price field at export time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingParameters {
    /// Percentage markup; no bound is enforced (negative values discount).
    pub margin_percent: f64,
    /// Multiplier converting into the target currency.
    pub conversion_rate: f64,
}

impl Default for PricingParameters {
    fn default() -> Self {
        Self {
            margin_percent: 0.0,
            conversion_rate: 1.0,
        }
    }
}

impl PricingParameters {
    pub fn new(margin_percent: f64, conversion_rate: f64) -> Self {
        Self {
            margin_percent,
            conversion_rate,
        }
    }

    /// Combined factor applied to a base price.
    pub fn factor(&self) -> f64 {
        (1.0 + self.margin_percent / 100.0) * self.conversion_rate
    }
}

/// User-selected tags merged into every exported record.
///
/// Keeps insertion order; blank and duplicate tags are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag. Returns false when it was blank or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag.trim());
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_identity() {
        assert!((PricingParameters::default().factor() - 1.0).abs() < f64::EPSILON);
        assert!((PricingParameters::new(10.0, 2.0).factor() - 2.2).abs() < 1e-12);
    }

    #[test]
    fn tag_set_ignores_blank_and_duplicates() {
        let mut tags: TagSet = [" sale ", "", "new", "sale"].into_iter().collect();
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["sale", "new"]);
        assert!(!tags.insert("new"));
        assert!(tags.remove("sale"));
        assert_eq!(tags.len(), 1);
    }
}
