//! Health label extraction from free-form analysis text.
//!
//! The analysis prompt asks the model to finish with
//! `This week's overall health: <Label>`. The match is a best-effort
//! heuristic: wording drift, a missing phrase, or a label outside the three
//! known values all fall back to [`HealthLabel::Stable`].

use std::sync::LazyLock;

use regex::Regex;

use crate::types::HealthLabel;

/// Matches the verdict sentence. Accepts straight or typographic apostrophes
/// and markdown emphasis or brackets around the label.
static HEALTH_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)this\s+week(?:'|’)?s\s+overall\s+health\s*:\s*[*_\[]*\s*([a-z]+)")
        .expect("Invalid regex")
});

/// Extract the health label from analysis text.
///
/// When the phrase appears more than once the last occurrence wins, since
/// the verdict is the trailing sentence. Never fails.
#[must_use]
pub fn extract_health(text: &str) -> HealthLabel {
    HEALTH_PHRASE
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .and_then(|label| label.as_str().parse().ok())
        .unwrap_or_default()
}
