//! Dashboard state shared by the report and analysis flows.
//!
//! `DashboardState` is a plain owned value with single-writer transitions:
//! [`begin_analysis`](DashboardState::begin_analysis) marks a call as in
//! flight, and [`complete`](DashboardState::complete) applies its settled
//! outcome. A ticket ties each outcome to the call that produced it, so a
//! response arriving after [`cancel`](DashboardState::cancel) (or after a
//! newer call started) is discarded instead of overwriting newer state.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use sku_pulse_core::{AnalysisResult, HealthLabel, PortfolioMetrics, RowMetrics, SkuRecord};

use crate::analyzer::Analyzer;
use crate::gemini::GeminiError;

/// User-facing message shown for any analysis failure.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed. Please check your connection.";

/// Errors from invalid state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// A second analysis was requested while one is pending.
    #[error("an analysis is already in progress")]
    InFlight,
}

/// Identifies one analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
}

/// What [`DashboardState::complete`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// A new analysis replaced the previous one.
    Succeeded(HealthLabel),
    /// The call failed; the error message is set.
    Failed,
    /// The call was cancelled or superseded; nothing changed.
    Stale,
}

/// Dataset plus the observable analysis state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    records: Vec<SkuRecord>,
    analysis: Option<AnalysisResult>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl DashboardState {
    /// Create state over a dataset with no analysis.
    #[must_use]
    pub const fn new(records: Vec<SkuRecord>) -> Self {
        Self {
            records,
            analysis: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// The SKU dataset.
    #[must_use]
    pub fn records(&self) -> &[SkuRecord] {
        &self.records
    }

    /// Replace the dataset. Derived metrics follow on the next read.
    pub fn set_records(&mut self, records: Vec<SkuRecord>) {
        self.records = records;
    }

    /// Portfolio KPIs for the current dataset.
    #[must_use]
    pub fn metrics(&self) -> PortfolioMetrics {
        PortfolioMetrics::compute(&self.records)
    }

    /// Each SKU paired with its derived row fields.
    pub fn rows(&self) -> impl Iterator<Item = (&SkuRecord, RowMetrics)> {
        self.records.iter().map(|sku| (sku, RowMetrics::derive(sku)))
    }

    /// The latest successful analysis, if any.
    #[must_use]
    pub const fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Whether an analysis call is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The user-facing error from the last call, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark an analysis as started.
    ///
    /// Clears any previous error. The previous analysis stays visible until
    /// a new one succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InFlight` if an analysis is already pending.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, StateError> {
        if self.loading {
            return Err(StateError::InFlight);
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Ok(AnalysisTicket {
            generation: self.generation,
        })
    }

    /// Apply the settled outcome of the call identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<String, GeminiError>,
    ) -> Settlement {
        self.complete_at(ticket, outcome, Utc::now())
    }

    /// Like [`complete`](Self::complete) with an explicit completion time.
    pub fn complete_at(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<String, GeminiError>,
        completed_at: DateTime<Utc>,
    ) -> Settlement {
        if !self.loading || ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale analysis outcome"
            );
            return Settlement::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(text) => {
                let result = AnalysisResult::from_response(text, completed_at);
                let health = result.overall_health;
                info!(health = %health, chars = result.summary.len(), "Analysis updated");
                self.analysis = Some(result);
                Settlement::Succeeded(health)
            }
            Err(e) => {
                error!(error = %e, "Analysis failed");
                self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
                Settlement::Failed
            }
        }
    }

    /// Abandon the in-flight call, if any.
    ///
    /// Returns `true` if a call was pending. Its outcome, should it still
    /// arrive, will be reported as [`Settlement::Stale`].
    pub fn cancel(&mut self) -> bool {
        if !self.loading {
            return false;
        }
        self.loading = false;
        self.generation += 1;
        info!("Analysis cancelled");
        true
    }

    /// Run one analysis end to end: begin, await the analyzer, complete.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InFlight` if an analysis is already pending.
    /// Analyzer failures are not errors here; they are recorded in state and
    /// reported as [`Settlement::Failed`].
    #[instrument(skip_all, fields(skus = self.records.len()))]
    pub async fn run_analysis<A: Analyzer>(
        &mut self,
        analyzer: &A,
    ) -> Result<Settlement, StateError> {
        let ticket = self.begin_analysis()?;
        let outcome = analyzer.analyze(&self.records).await;
        Ok(self.complete(ticket, outcome))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn api_error() -> GeminiError {
        GeminiError::Api {
            status: "UNAVAILABLE".to_string(),
            message: "The model is overloaded".to_string(),
        }
    }

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let mut state = DashboardState::default();
        let ticket = state.begin_analysis().unwrap();
        state.complete(ticket, Err(api_error()));
        assert!(state.error().is_some());

        state.begin_analysis().unwrap();
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_second_begin_while_loading_is_refused() {
        let mut state = DashboardState::default();
        state.begin_analysis().unwrap();
        assert_eq!(state.begin_analysis(), Err(StateError::InFlight));
        assert!(state.is_loading());
    }

    #[test]
    fn test_success_replaces_previous_analysis() {
        let mut state = DashboardState::default();
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().unwrap();

        let ticket = state.begin_analysis().unwrap();
        state.complete_at(ticket, Ok("This week's overall health: Excellent".into()), at);

        let ticket = state.begin_analysis().unwrap();
        let settlement = state.complete_at(ticket, Ok("No verdict".into()), at);

        assert_eq!(settlement, Settlement::Succeeded(HealthLabel::Stable));
        let analysis = state.analysis().unwrap();
        assert_eq!(analysis.summary, "No verdict");
        assert_eq!(analysis.overall_health, HealthLabel::Stable);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_keeps_previous_analysis() {
        let mut state = DashboardState::default();
        let ticket = state.begin_analysis().unwrap();
        state.complete(ticket, Ok("This week's overall health: Caution".into()));

        let ticket = state.begin_analysis().unwrap();
        let settlement = state.complete(ticket, Err(api_error()));

        assert_eq!(settlement, Settlement::Failed);
        assert_eq!(state.error(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(!state.is_loading());
        assert_eq!(
            state.analysis().unwrap().overall_health,
            HealthLabel::Caution
        );
    }

    #[test]
    fn test_cancelled_call_cannot_overwrite() {
        let mut state = DashboardState::default();
        let ticket = state.begin_analysis().unwrap();
        assert!(state.cancel());
        assert!(!state.is_loading());

        let settlement = state.complete(ticket, Ok("This week's overall health: Excellent".into()));
        assert_eq!(settlement, Settlement::Stale);
        assert!(state.analysis().is_none());
    }

    #[test]
    fn test_superseded_call_cannot_overwrite() {
        let mut state = DashboardState::default();
        let old = state.begin_analysis().unwrap();
        state.cancel();
        let new = state.begin_analysis().unwrap();

        assert_eq!(state.complete(old, Err(api_error())), Settlement::Stale);
        assert!(state.error().is_none());
        assert!(state.is_loading());

        let settlement = state.complete(new, Ok("This week's overall health: Caution".into()));
        assert_eq!(settlement, Settlement::Succeeded(HealthLabel::Caution));
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut state = DashboardState::default();
        assert!(!state.cancel());
    }

    #[test]
    fn test_complete_twice_is_stale() {
        let mut state = DashboardState::default();
        let ticket = state.begin_analysis().unwrap();
        state.complete(ticket, Ok("first".into()));
        assert_eq!(state.complete(ticket, Ok("second".into())), Settlement::Stale);
        assert_eq!(state.analysis().unwrap().summary, "first");
    }
}
