//! Weekly health verdict.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Three-valued verdict summarising the week's performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HealthLabel {
    Excellent,
    #[default]
    Stable,
    Caution,
}

impl HealthLabel {
    /// All labels, in the order the analysis prompt lists them.
    pub const ALL: [Self; 3] = [Self::Excellent, Self::Stable, Self::Caution];

    /// Canonical display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Stable => "Stable",
            Self::Caution => "Caution",
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string is not one of the three health labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid health label: {0}")]
pub struct ParseHealthLabelError(String);

impl FromStr for HealthLabel {
    type Err = ParseHealthLabelError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseHealthLabelError(s.to_string()))
    }
}
