//! Tag merging for the `Tags` field.

use shop_model::TagSet;

/// Merges session tags into an existing comma-separated tag value.
///
/// Existing tags come first, then new ones, each once and in first-seen
/// order. Blank tokens are dropped. An empty tag set leaves the value
/// untouched.
pub fn merge_tags(existing: &str, tags: &TagSet) -> String {
    if tags.is_empty() {
        return existing.to_string();
    }
    let mut merged: Vec<&str> = Vec::new();
    for tag in existing.split(',').map(str::trim).chain(tags.iter()) {
        if !tag.is_empty() && !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    merged.join(", ")
}
