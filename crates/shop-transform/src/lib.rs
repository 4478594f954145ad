//! Record transformation for product exports.
//!
//! Provides the per-field transformations and the record transformer that
//! combines them:
//!
//! - **Price adjustment**: margin and currency conversion on `Regular price`
//!   and `Sale price`, formatted with two decimals
//! - **Tag merging**: union of existing `Tags` with session-selected tags
//! - **Record transformation**: one canonical record per uploaded row, with
//!   every catalog header present
//!
//! # Example
//!
//! ```ignore
//! use shop_transform::transform_records;
//!
//! let records = transform_records(&rows, &header_map, &catalog, &pricing, &tags);
//! assert_eq!(records.len(), rows.len());
//! ```
//!
//! All functions are pure: malformed prices degrade to empty fields instead
//! of failing the batch.

mod error;
mod record;

pub mod pricing;
pub mod tags;

pub use error::TransformError;
pub use pricing::{adjust_price, parse_price, resolve_parameters};
pub use record::{TransformStats, transform_records, transform_records_with_stats, transform_row};
pub use tags::merge_tags;
