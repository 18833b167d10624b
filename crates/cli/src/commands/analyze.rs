//! AI analysis command.
//!
//! # Usage
//!
//! ```bash
//! sku-pulse analyze
//! sku-pulse analyze --data week-14.json
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` - Google Gemini API key (falls back to `API_KEY`)
//! - `GEMINI_MODEL` - Model ID (default: gemini-3-flash-preview)
//! - `GEMINI_TEMPERATURE` - Sampling temperature (default: 0.5)

use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use sku_pulse_dashboard::report::render_analysis;
use sku_pulse_dashboard::{
    ANALYSIS_FAILED_MESSAGE, Analyzer, DashboardConfig, DashboardState, GeminiClient, Settlement,
    load_dataset,
};

/// Errors that end an analysis command without a result.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The analysis call failed; the cause has already been logged.
    #[error("{}", ANALYSIS_FAILED_MESSAGE)]
    Failed,

    /// Interrupted with Ctrl-C before the call settled.
    #[error("Analysis cancelled")]
    Cancelled,
}

/// Run one analysis and print the analysis panel.
///
/// # Errors
///
/// Returns an error if configuration or the dataset cannot be loaded, the
/// analysis fails or is cancelled, or stdout is closed.
pub async fn run(data: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_dataset(data).await?;
    let mut state = DashboardState::new(records);

    let client = client_from_env()?;
    analyze_with_cancel(&mut state, &client).await?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render_analysis(&state))?;
    Ok(())
}

/// Build a Gemini client from environment configuration.
///
/// # Errors
///
/// Returns an error if the API key is missing or invalid.
pub fn client_from_env() -> Result<GeminiClient, Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    info!(model = %config.gemini().model, "Using Gemini");
    Ok(GeminiClient::new(config.gemini())?)
}

/// Run one analysis on `state`, abandoning it on Ctrl-C.
///
/// # Errors
///
/// Returns `AnalyzeError::Failed` if the call failed and
/// `AnalyzeError::Cancelled` if it was interrupted.
pub async fn analyze_with_cancel<A: Analyzer>(
    state: &mut DashboardState,
    analyzer: &A,
) -> Result<(), Box<dyn std::error::Error>> {
    let ticket = state.begin_analysis()?;

    let outcome = tokio::select! {
        outcome = analyzer.analyze(state.records()) => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };

    let Some(outcome) = outcome else {
        state.cancel();
        warn!("Analysis interrupted");
        return Err(AnalyzeError::Cancelled.into());
    };

    match state.complete(ticket, outcome) {
        Settlement::Succeeded(health) => {
            info!(health = %health, "Analysis complete");
            Ok(())
        }
        Settlement::Failed | Settlement::Stale => Err(AnalyzeError::Failed.into()),
    }
}
