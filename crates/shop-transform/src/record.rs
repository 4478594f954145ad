//! Record transformer: raw rows to canonical records.

use shop_model::{
    CanonicalRecord, HeaderCatalog, HeaderMap, PricingParameters, REGULAR_PRICE, RawRow, SALE_PRICE,
    TAGS, TagSet,
};
use tracing::debug;

use crate::pricing::adjust_price;
use crate::tags::merge_tags;

/// Counters collected while transforming a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Records produced.
    pub rows: usize,
    /// Price cells that went through the price adjuster.
    pub price_fields: usize,
    /// Non-empty price cells that could not be read and were emptied.
    pub degraded_prices: usize,
}

/// Builds the canonical record for one row.
///
/// Every catalog header is present, in catalog order. A header is filled
/// from the first column in upload order mapped to it; unmapped headers and
/// missing cells become empty strings.
pub fn transform_row(
    row: &RawRow,
    header_map: &HeaderMap,
    catalog: &HeaderCatalog,
    pricing: &PricingParameters,
    tags: &TagSet,
) -> CanonicalRecord {
    transform_row_counted(row, header_map, catalog, pricing, tags, &mut TransformStats::default())
}

fn transform_row_counted(
    row: &RawRow,
    header_map: &HeaderMap,
    catalog: &HeaderCatalog,
    pricing: &PricingParameters,
    tags: &TagSet,
    stats: &mut TransformStats,
) -> CanonicalRecord {
    let mut record = CanonicalRecord::with_capacity(catalog.len());
    for header in catalog.iter() {
        let raw = header_map
            .source_for(header)
            .and_then(|column| row.get(column))
            .unwrap_or("");
        let value = match header {
            REGULAR_PRICE | SALE_PRICE => {
                let adjusted = adjust_price(raw, pricing);
                stats.price_fields += 1;
                if adjusted.is_empty() && !raw.trim().is_empty() {
                    stats.degraded_prices += 1;
                }
                adjusted
            }
            TAGS => merge_tags(raw, tags),
            _ => raw.to_string(),
        };
        record.push(header, value);
    }
    stats.rows += 1;
    record
}

/// Transforms every row, preserving order and count.
pub fn transform_records(
    rows: &[RawRow],
    header_map: &HeaderMap,
    catalog: &HeaderCatalog,
    pricing: &PricingParameters,
    tags: &TagSet,
) -> Vec<CanonicalRecord> {
    transform_records_with_stats(rows, header_map, catalog, pricing, tags).0
}

/// Like [`transform_records`], also returning batch counters.
pub fn transform_records_with_stats(
    rows: &[RawRow],
    header_map: &HeaderMap,
    catalog: &HeaderCatalog,
    pricing: &PricingParameters,
    tags: &TagSet,
) -> (Vec<CanonicalRecord>, TransformStats) {
    let mut stats = TransformStats::default();
    let records: Vec<CanonicalRecord> = rows
        .iter()
        .map(|row| transform_row_counted(row, header_map, catalog, pricing, tags, &mut stats))
        .collect();
    debug!(
        rows = stats.rows,
        headers = catalog.len(),
        price_fields = stats.price_fields,
        degraded_prices = stats.degraded_prices,
        tags = tags.len(),
        "records transformed"
    );
    (records, stats)
}
