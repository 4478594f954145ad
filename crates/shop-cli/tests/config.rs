//! Admin configuration files on disk.

use std::fs;

use shop_cli::config::{ConfigError, load_config};
use shop_model::ExportFormat;
use shop_transform::resolve_parameters;
use tempfile::tempdir;

const ADMIN: &str = r#"
[headers]
disabled = ["download limit", "Download expiry days"]

[[pricing_rules]]
category = "Books"
margin_percent = 15
tax_percent = 8
shipping_cost = 4.5
conversion_rates = { EUR = 0.5 }

[[pricing_rules]]
category = "Toys"
margin_percent = 30

[export]
default_name = "catalog"
default_format = "json"
output_dir = "exports"
"#;

#[test]
fn loads_full_admin_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("admin.toml");
    fs::write(&path, ADMIN).unwrap();

    let config = load_config(Some(&path)).unwrap();
    let catalog = config.effective_catalog().unwrap();
    assert_eq!(catalog.len(), 39);
    assert!(!catalog.contains("Download limit"));
    assert_eq!(config.export.default_format, Some(ExportFormat::Json));
    assert_eq!(config.export.default_name.as_deref(), Some("catalog"));

    let books = config.rule_for("books").unwrap();
    let pricing = resolve_parameters(books, Some("eur")).unwrap();
    assert_eq!(pricing.margin_percent, 15.0);
    assert_eq!(pricing.conversion_rate, 0.5);
    assert!(resolve_parameters(config.rule_for("Toys").unwrap(), Some("EUR")).is_err());
}

#[test]
fn rejects_duplicate_categories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("admin.toml");
    fs::write(
        &path,
        "[[pricing_rules]]\ncategory = \"Books\"\n\n[[pricing_rules]]\ncategory = \" books\"\n",
    )
    .unwrap();

    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateCategory { ref category, .. } if category == " books"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
