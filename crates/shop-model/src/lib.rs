//! Data model for the product import/export toolkit.
//!
//! Everything here is plain data: the canonical header catalog, uploaded rows,
//! header mappings, canonical output records, pricing parameters, admin
//! configuration records and seller registration payloads. Behavior lives in
//! the `shop-map`, `shop-transform` and `shop-output` crates.

pub mod admin;
pub mod catalog;
pub mod error;
pub mod pricing;
pub mod processing;
pub mod seller;
pub mod table;

pub use admin::{AdminConfig, ExportDefaults, HeaderSettings, PricingRule};
pub use catalog::{DEFAULT_HEADERS, HeaderCatalog, REGULAR_PRICE, SALE_PRICE, TAGS};
pub use error::{ModelError, Result};
pub use pricing::{PricingParameters, TagSet};
pub use processing::ExportFormat;
pub use seller::{SellerRegistration, SellerStatus, ValidationError};
pub use table::{CanonicalRecord, HeaderMap, RawRow};
