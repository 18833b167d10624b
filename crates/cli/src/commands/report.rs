//! Dashboard report command.
//!
//! # Usage
//!
//! ```bash
//! sku-pulse report
//! sku-pulse report --data week-14.yaml --analyze
//! ```

use std::io::Write;
use std::path::Path;

use tracing::warn;

use sku_pulse_dashboard::report::render_dashboard;
use sku_pulse_dashboard::{DashboardState, load_dataset};

use super::analyze::{AnalyzeError, analyze_with_cancel, client_from_env};

/// Render the full dashboard, optionally after one analysis.
///
/// A failed analysis does not abort the report: the panel shows the error
/// and the rest of the dashboard is still printed.
///
/// # Errors
///
/// Returns an error if the dataset or configuration cannot be loaded, the
/// analysis is cancelled, or stdout is closed.
pub async fn run(data: Option<&Path>, analyze: bool) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_dataset(data).await?;
    let mut state = DashboardState::new(records);

    if analyze {
        let client = client_from_env()?;
        if let Err(e) = analyze_with_cancel(&mut state, &client).await {
            if matches!(e.downcast_ref::<AnalyzeError>(), Some(AnalyzeError::Cancelled)) {
                return Err(e);
            }
            warn!(error = %e, "Rendering report without a fresh analysis");
        }
    }

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render_dashboard(&state))?;
    Ok(())
}
