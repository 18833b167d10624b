//! Dataset loading.
//!
//! The dashboard runs over the built-in sample set unless a JSON or YAML file
//! with the same record shape is supplied.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use sku_pulse_core::sample::sample_skus;
use sku_pulse_core::{SkuId, SkuRecord};

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported dataset format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("duplicate SKU id: {0}")]
    DuplicateId(SkuId),
}

/// Load a dataset from `path`, or the built-in sample when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, has an unknown
/// extension, or contains duplicate SKU ids.
pub async fn load_dataset(path: Option<&Path>) -> Result<Vec<SkuRecord>, DatasetError> {
    let records = match path {
        None => sample_skus()?,
        Some(path) => {
            let content = tokio::fs::read_to_string(path).await?;
            parse_dataset(path, &content)?
        }
    };

    validate_unique_ids(&records)?;
    info!(
        source = path.map_or_else(|| "sample".to_string(), |p| p.display().to_string()),
        skus = records.len(),
        "Loaded dataset"
    );
    Ok(records)
}

/// Parse file content according to the path's extension.
fn parse_dataset(path: &Path, content: &str) -> Result<Vec<SkuRecord>, DatasetError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(serde_json::from_str(content)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
        _ => Err(DatasetError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Reject datasets where two records share an id.
fn validate_unique_ids(records: &[SkuRecord]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(&record.id) {
            return Err(DatasetError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}
