//! Seam between the dashboard state and the text-generation service.

use std::future::Future;

use sku_pulse_core::SkuRecord;

use crate::gemini::{GeminiClient, GeminiError};

/// Something that turns a SKU dataset into free-form analysis text.
///
/// Implementations perform one attempt per call and hold no per-call state,
/// so a single instance may serve overlapping calls.
pub trait Analyzer {
    /// Analyze the dataset, returning the raw model text.
    fn analyze(
        &self,
        records: &[SkuRecord],
    ) -> impl Future<Output = Result<String, GeminiError>> + Send;
}

impl Analyzer for GeminiClient {
    fn analyze(
        &self,
        records: &[SkuRecord],
    ) -> impl Future<Output = Result<String, GeminiError>> + Send {
        Self::analyze(self, records)
    }
}
