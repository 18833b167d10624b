//! Result of one external business analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::health::HealthLabel;
use crate::health::extract_health;

/// Summary produced by a single successful analysis call.
///
/// A new result fully replaces any previous one; results are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Model output, unchanged.
    pub summary: String,
    /// Verdict extracted from the summary (defaults to `Stable`).
    pub overall_health: HealthLabel,
    /// When the call completed.
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Build a result from the raw model text.
    ///
    /// The summary is kept verbatim; only the health label is extracted.
    #[must_use]
    pub fn from_response(text: impl Into<String>, completed_at: DateTime<Utc>) -> Self {
        let summary = text.into();
        let overall_health = extract_health(&summary);
        Self {
            summary,
            overall_health,
            timestamp: completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_from_response_keeps_summary_verbatim() {
        let text = "1. Weekly Performance Overview:\n  - ₹4,52,000\n\nThis week's overall health: Caution";
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).single().expect("valid time");

        let result = AnalysisResult::from_response(text, at);

        assert_eq!(result.summary, text);
        assert_eq!(result.overall_health, HealthLabel::Caution);
        assert_eq!(result.timestamp, at);
    }
}
