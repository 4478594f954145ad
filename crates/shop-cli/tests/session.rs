//! End-to-end session flows: upload, mapping, pricing, tags, export.

use std::fs;
use std::path::Path;

use shop_cli::config::parse_config;
use shop_cli::session::{ExportSession, PricingRequest, SessionError};
use shop_ingest::{IngestError, parse_csv_str};
use shop_map::ColumnStatus;
use shop_model::{AdminConfig, ExportFormat, HeaderCatalog, PricingParameters};
use shop_transform::TransformError;
use tempfile::tempdir;

const PRODUCTS: &str = "\
Product Name,Cost,Tags,sku
Widget,$10.00,new,W-1
Gadget,n/a,,G-2
Gizmo,\"1,250.5\",\"sale, new\",G-3
";

fn session(dir: &Path) -> ExportSession {
    let mut session = ExportSession::new(HeaderCatalog::default(), dir.join("out"));
    session.load_upload(parse_csv_str(PRODUCTS).unwrap());
    session
}

#[test]
fn widget_export_applies_margin() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.set_override("Cost", "Regular price").unwrap();
    session.set_pricing(PricingParameters::new(10.0, 1.0));

    let records = session.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("Name"), Some("Widget"));
    assert_eq!(records[0].get("Regular price"), Some("11.00"));
    assert_eq!(records[1].get("Regular price"), Some(""));
    assert_eq!(records[2].get("Regular price"), Some("1375.55"));
    assert_eq!(records[2].get("SKU"), Some("G-3"));

    let outcome = session.export(ExportFormat::Csv, Some("widgets")).unwrap();
    assert_eq!(outcome.records, 3);
    assert_eq!(outcome.stats.degraded_prices, 1);
    assert_eq!(outcome.path, dir.path().join("out").join("widgets.csv"));
    let written = fs::read_to_string(&outcome.path).unwrap();
    assert!(written.contains("\"Widget\""));
    assert!(written.contains("\"11.00\""));
}

#[test]
fn tags_merge_into_existing_values() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    assert_eq!(session.add_tags(["sale", " sale ", ""]), 1);

    let records = session.records();
    assert_eq!(records[0].get("Tags"), Some("new, sale"));
    assert_eq!(records[1].get("Tags"), Some("sale"));
    assert_eq!(records[2].get("Tags"), Some("sale, new"));
}

#[test]
fn selection_limits_exported_rows() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.select_rows(&[3, 1, 3]).unwrap();
    assert_eq!(session.selected_rows(), Some(vec![1, 3]));

    let outcome = session.export(ExportFormat::Json, None).unwrap();
    assert_eq!(outcome.records, 2);
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outcome.path).unwrap()).unwrap();
    assert_eq!(json[0]["Name"], "Widget");
    assert_eq!(json[1]["Name"], "Gizmo");
    assert!(outcome.path.ends_with("products_export.json"));

    assert!(matches!(
        session.select_rows(&[4]),
        Err(SessionError::RowOutOfRange { row: 4, rows: 3 })
    ));
    assert!(matches!(
        session.select_rows(&[0]),
        Err(SessionError::RowOutOfRange { row: 0, .. })
    ));
}

#[test]
fn empty_selection_is_rejected_without_a_file() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.select_rows(&[]).unwrap();

    let err = session.export(ExportFormat::Csv, None).unwrap_err();
    assert!(err.is_empty_export());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn export_without_upload_is_rejected() {
    let dir = tempdir().unwrap();
    let mut session = ExportSession::new(HeaderCatalog::default(), dir.path());
    assert!(session.export(ExportFormat::Csv, None).unwrap_err().is_empty_export());
    assert!(matches!(
        session.set_override("Cost", "Regular price"),
        Err(SessionError::NoUpload)
    ));
}

#[test]
fn reset_keeps_pricing_and_tags() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.set_pricing(PricingParameters::new(5.0, 2.0));
    session.add_tags(["sale"]);
    session.select_rows(&[1]).unwrap();

    session.reset();
    assert!(session.upload().is_none());
    assert!(session.mapping().is_none());
    assert_eq!(session.selected_rows(), None);
    assert_eq!(session.pricing(), &PricingParameters::new(5.0, 2.0));
    assert!(session.tags().contains("sale"));
    assert!(session.records().is_empty());
}

#[test]
fn new_upload_replaces_mapping_and_selection() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.set_override("Cost", "Regular price").unwrap();
    session.select_rows(&[2]).unwrap();

    session.load_upload(parse_csv_str("Cost\n5\n").unwrap());
    let mapping = session.mapping().unwrap();
    assert_eq!(mapping.status("Cost"), ColumnStatus::Unmapped);
    assert_eq!(session.selected_rows(), None);
}

#[test]
fn failed_load_clears_previous_upload() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "").unwrap();

    let err = session.load_file(&empty).unwrap_err();
    assert!(matches!(err, SessionError::Ingest(IngestError::MissingHeader)));
    assert!(session.upload().is_none());
}

#[test]
fn load_file_maps_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("products.csv");
    fs::write(&path, PRODUCTS).unwrap();

    let mut session = ExportSession::new(HeaderCatalog::default(), dir.path());
    session.load_file(&path).unwrap();
    let mapping = session.mapping().unwrap();
    assert_eq!(mapping.header_map().target("Product Name"), Some("Name"));
    assert_eq!(mapping.header_map().target("sku"), Some("SKU"));
    assert_eq!(mapping.status("Cost"), ColumnStatus::Unmapped);
}

#[test]
fn removed_tags_are_not_merged() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.add_tags(["sale", "clearance"]);
    assert!(session.remove_tag(" sale "));
    assert!(!session.remove_tag("sale"));

    let records = session.records();
    assert_eq!(records[0].get("Tags"), Some("new, clearance"));
    assert_eq!(records[1].get("Tags"), Some("clearance"));
}

#[test]
fn clear_selection_exports_every_row() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.select_rows(&[2]).unwrap();
    assert_eq!(session.records().len(), 1);

    session.clear_selection();
    assert_eq!(session.selected_rows(), None);
    let outcome = session.export(ExportFormat::Csv, None).unwrap();
    assert_eq!(outcome.records, 3);
}

#[test]
fn column_profiles_describe_uploaded_values() {
    let dir = tempdir().unwrap();
    let session = session(dir.path());
    let profiles = session.column_profiles(2);

    let columns: Vec<&str> = profiles.iter().map(|p| p.hint.column.as_str()).collect();
    assert_eq!(columns, vec!["Product Name", "Cost", "Tags", "sku"]);
    assert_eq!(profiles[0].samples, vec!["Widget", "Gadget"]);
    assert!(!profiles[1].hint.is_numeric);
    assert!((profiles[2].hint.null_ratio - 1.0 / 3.0).abs() < 1e-9);

    let empty = ExportSession::new(HeaderCatalog::default(), dir.path());
    assert!(empty.column_profiles(2).is_empty());
}

const RULES: &str = r#"
[[pricing_rules]]
category = "Books"
margin_percent = 15
conversion_rates = { EUR = 0.5 }
"#;

fn rules() -> AdminConfig {
    parse_config(RULES, Path::new("admin.toml")).unwrap()
}

fn request(category: Option<&str>, currency: Option<&str>) -> PricingRequest {
    PricingRequest {
        category: category.map(str::to_string),
        currency: currency.map(str::to_string),
        ..PricingRequest::default()
    }
}

#[test]
fn pricing_request_uses_category_rule() {
    let config = rules();
    assert_eq!(
        request(Some("books"), Some("eur")).resolve(&config).unwrap(),
        PricingParameters::new(15.0, 0.5)
    );
    assert_eq!(
        request(Some("Books"), None).resolve(&config).unwrap(),
        PricingParameters::new(15.0, 1.0)
    );
    assert_eq!(
        request(None, None).resolve(&config).unwrap(),
        PricingParameters::default()
    );
}

#[test]
fn explicit_pricing_values_override_rule() {
    let config = rules();
    let margin = PricingRequest {
        margin_percent: Some(20.0),
        ..request(Some("Books"), Some("EUR"))
    };
    assert_eq!(margin.resolve(&config).unwrap(), PricingParameters::new(20.0, 0.5));

    let rate = PricingRequest {
        conversion_rate: Some(2.0),
        ..request(Some("Books"), Some("EUR"))
    };
    assert_eq!(rate.resolve(&config).unwrap(), PricingParameters::new(15.0, 2.0));

    let no_rule = PricingRequest {
        margin_percent: Some(10.0),
        ..PricingRequest::default()
    };
    assert_eq!(no_rule.resolve(&config).unwrap(), PricingParameters::new(10.0, 1.0));
}

#[test]
fn pricing_request_rejects_unknown_category_and_currency() {
    let config = rules();
    assert!(matches!(
        request(Some("Games"), None).resolve(&config),
        Err(SessionError::UnknownCategory { category }) if category == "Games"
    ));
    assert!(matches!(
        request(Some("Books"), Some("GBP")).resolve(&config),
        Err(SessionError::Pricing(TransformError::UnknownCurrency { .. }))
    ));
}

#[test]
fn rule_pricing_flows_into_export() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path());
    session.set_override("Cost", "Regular price").unwrap();
    let pricing = request(Some("Books"), Some("EUR")).resolve(&rules()).unwrap();
    session.set_pricing(pricing);

    let records = session.records();
    assert_eq!(records[0].get("Regular price"), Some("5.75"));
}
