//! Core types for SKU Pulse.
//!
//! This module provides the input record and the value types derived from it.

pub mod analysis;
pub mod health;
pub mod ratio;
pub mod sku;

pub use analysis::AnalysisResult;
pub use health::{HealthLabel, ParseHealthLabelError};
pub use ratio::Ratio;
pub use sku::{SkuId, SkuRecord};
