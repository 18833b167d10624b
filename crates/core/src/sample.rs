//! Built-in weekly sample dataset (twelve men's grooming SKUs, INR).

use crate::types::SkuRecord;

const SAMPLE_SKUS_JSON: &str = include_str!("../data/sample_skus.json");

/// The built-in sample dataset.
///
/// # Errors
///
/// Returns an error only if the embedded JSON does not match [`SkuRecord`].
pub fn sample_skus() -> Result<Vec<SkuRecord>, serde_json::Error> {
    serde_json::from_str(SAMPLE_SKUS_JSON)
}
