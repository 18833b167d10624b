//! Ratio values with an explicit undefined state.
//!
//! Every ratio in the dashboard (ROAS, stock level, CTR, CPC) has a
//! denominator that can legitimately be zero. Instead of letting a division
//! produce `NaN` or `Infinity`, a zero denominator yields [`Ratio::UNDEFINED`],
//! which renders as [`Ratio::PLACEHOLDER`].

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A ratio that may be undefined because its denominator was zero.
///
/// Serializes as a JSON number string (like every other `Decimal`) or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Ratio(Option<Decimal>);

impl Ratio {
    /// The undefined ratio.
    pub const UNDEFINED: Self = Self(None);

    /// Display placeholder for an undefined ratio.
    pub const PLACEHOLDER: &'static str = "—";

    /// Wrap an already-computed value.
    #[must_use]
    pub const fn defined(value: Decimal) -> Self {
        Self(Some(value))
    }

    /// Divide `numerator` by `denominator`, yielding [`Ratio::UNDEFINED`] for a
    /// zero denominator.
    #[must_use]
    pub fn of(numerator: Decimal, denominator: Decimal) -> Self {
        Self(numerator.checked_div(denominator))
    }

    /// `numerator / denominator × 100`, undefined for a zero denominator.
    #[must_use]
    pub fn percent(numerator: Decimal, denominator: Decimal) -> Self {
        Self(
            numerator
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(denominator)),
        )
    }

    /// The value, or `None` when undefined.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        self.0
    }

    /// Returns `true` when the denominator was zero.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        self.0.is_none()
    }

    /// Round to `dp` decimal places, half away from zero.
    #[must_use]
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(
            self.0
                .map(|v| v.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)),
        )
    }

    /// Clamp a defined value into `[min, max]`; undefined becomes `min`.
    #[must_use]
    pub fn clamp_or_min(&self, min: Decimal, max: Decimal) -> Decimal {
        self.0.map_or(min, |v| v.clamp(min, max))
    }
}

impl From<Decimal> for Ratio {
    fn from(value: Decimal) -> Self {
        Self::defined(value)
    }
}

/// Formats the value honouring the formatter's precision (`{:.2}`), or the
/// placeholder when undefined.
impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, f.precision()) {
            (None, _) => f.pad(Self::PLACEHOLDER),
            (Some(v), Some(precision)) => {
                let dp = u32::try_from(precision).unwrap_or(u32::MAX);
                let rounded = v.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{:.*}", precision, rounded)
            }
            (Some(v), None) => write!(f, "{}", v.normalize()),
        }
    }
}
