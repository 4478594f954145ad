//! Admin-managed configuration records.
//!
//! Admins decide which canonical headers are exported and which pricing rule
//! applies to each product category. The records are plain serde types so
//! they can be loaded from any configuration source.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::HeaderCatalog;
use crate::error::{ModelError, Result};
use crate::pricing::PricingParameters;
use crate::processing::ExportFormat;

/// Headers excluded from the effective catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSettings {
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Pricing rule for one product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub category: String,
    #[serde(default)]
    pub margin_percent: f64,
    /// Listed by `rules` for reference; not applied to exported prices.
    #[serde(default)]
    pub tax_percent: f64,
    /// Listed by `rules` for reference; not applied to exported prices.
    #[serde(default)]
    pub shipping_cost: f64,
    /// Currency code to multiplier, relative to the store's base currency.
    #[serde(default)]
    pub conversion_rates: BTreeMap<String, f64>,
}

impl PricingRule {
    /// Conversion multiplier for a currency code (case-insensitive).
    pub fn conversion_rate(&self, currency: &str) -> Option<f64> {
        self.conversion_rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(currency.trim()))
            .map(|(_, rate)| *rate)
    }

    /// Parameters for this rule in the base currency.
    pub fn base_parameters(&self) -> PricingParameters {
        PricingParameters::new(self.margin_percent, 1.0)
    }
}

/// Defaults applied when an export does not specify them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDefaults {
    #[serde(default)]
    pub default_name: Option<String>,
    #[serde(default)]
    pub default_format: Option<ExportFormat>,
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Complete admin configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub headers: HeaderSettings,
    #[serde(default)]
    pub pricing_rules: Vec<PricingRule>,
    #[serde(default)]
    pub export: ExportDefaults,
}

impl AdminConfig {
    /// Checks disabled header names and rule category uniqueness.
    pub fn validate(&self) -> Result<()> {
        self.effective_catalog()?;
        let mut seen = BTreeSet::new();
        for rule in &self.pricing_rules {
            let key = rule.category.trim().to_lowercase();
            if !seen.insert(key) {
                return Err(ModelError::DuplicateCategory(rule.category.clone()));
            }
        }
        Ok(())
    }

    /// Default catalog minus disabled headers.
    pub fn effective_catalog(&self) -> Result<HeaderCatalog> {
        HeaderCatalog::default().without(self.headers.disabled.iter().map(String::as_str))
    }

    /// Pricing rule for a category (case-insensitive).
    pub fn rule_for(&self, category: &str) -> Option<&PricingRule> {
        let category = category.trim();
        self.pricing_rules
            .iter()
            .find(|rule| rule.category.trim().eq_ignore_ascii_case(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(category: &str) -> PricingRule {
        PricingRule {
            category: category.to_string(),
            margin_percent: 12.5,
            tax_percent: 0.0,
            shipping_cost: 0.0,
            conversion_rates: BTreeMap::from([("EUR".to_string(), 0.9)]),
        }
    }

    #[test]
    fn effective_catalog_drops_disabled_headers() {
        let config = AdminConfig {
            headers: HeaderSettings {
                disabled: vec!["download limit".to_string(), "Position".to_string()],
            },
            ..AdminConfig::default()
        };
        let catalog = config.effective_catalog().unwrap();
        assert_eq!(catalog.len(), 39);
        assert!(!catalog.contains("Download limit"));
        assert!(!catalog.contains("Position"));
    }

    #[test]
    fn validate_rejects_duplicate_categories() {
        let config = AdminConfig {
            pricing_rules: vec![rule("Electronics"), rule(" electronics ")],
            ..AdminConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ModelError::DuplicateCategory(" electronics ".to_string()))
        );
    }

    #[test]
    fn rule_lookup_is_case_insensitive() {
        let config = AdminConfig {
            pricing_rules: vec![rule("Electronics")],
            ..AdminConfig::default()
        };
        let found = config.rule_for("ELECTRONICS").unwrap();
        assert_eq!(found.conversion_rate("eur"), Some(0.9));
        assert_eq!(found.conversion_rate("USD"), None);
        assert!(config.rule_for("Books").is_none());
    }
}
