//! Analysis prompt construction.
//!
//! The dataset is embedded in full (pretty-printed JSON, every field) in a
//! fixed instruction template. The template's closing line is what
//! [`sku_pulse_core::health::extract_health`] looks for in the reply.

use askama::Template;

use sku_pulse_core::SkuRecord;
use sku_pulse_core::metrics::LOW_STOCK_THRESHOLD_PCT;

use crate::gemini::GeminiError;

/// Weekly analysis instruction template.
#[derive(Template)]
#[template(path = "analysis_prompt.txt")]
struct AnalysisPromptTemplate<'a> {
    dataset_json: &'a str,
    currency_name: &'a str,
    currency_symbol: &'a str,
    low_stock_threshold: String,
}

/// Render the analysis prompt for a dataset.
///
/// # Errors
///
/// Returns `GeminiError::Prompt` if the dataset cannot be serialized or the
/// template fails to render.
pub fn render_analysis_prompt(records: &[SkuRecord]) -> Result<String, GeminiError> {
    let dataset_json = serde_json::to_string_pretty(records)
        .map_err(|e| GeminiError::Prompt(format!("Failed to serialize dataset: {e}")))?;

    AnalysisPromptTemplate {
        dataset_json: &dataset_json,
        currency_name: "Indian Rupees",
        currency_symbol: "₹",
        low_stock_threshold: LOW_STOCK_THRESHOLD_PCT.to_string(),
    }
    .render()
    .map_err(|e| GeminiError::Prompt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use sku_pulse_core::sample::sample_skus;

    use super::*;

    #[test]
    fn test_prompt_embeds_every_sku() {
        let skus = sample_skus().expect("sample");
        let prompt = render_analysis_prompt(&skus).expect("render");

        for sku in &skus {
            assert!(prompt.contains(sku.id.as_str()), "missing {}", sku.id);
            assert!(prompt.contains(&sku.name), "missing {}", sku.name);
        }
        assert!(prompt.contains("\"totalCapacity\""));
        assert!(prompt.contains("\"conversionRate\""));
    }

    #[test]
    fn test_prompt_structure() {
        let prompt = render_analysis_prompt(&[]).expect("render");

        assert!(prompt.contains("Weekly Performance Overview"));
        assert!(prompt.contains("Ad Efficiency Analysis"));
        assert!(prompt.contains("Inventory Alerts"));
        assert!(prompt.contains("SKUs with low stock (< 30%)"));
        assert!(prompt.contains("Recommendations"));
        assert!(prompt.contains("Forecast"));
        assert!(prompt.contains("Indian Rupees (₹)"));
        assert!(prompt.contains("This week's overall health: [Excellent / Stable / Caution]"));
    }

    #[test]
    fn test_prompt_is_not_html_escaped() {
        let prompt = render_analysis_prompt(&[]).expect("render");
        assert!(prompt.contains("men's grooming"));
        assert!(!prompt.contains("&#"));
    }
}
