//! Portfolio KPI command.
//!
//! # Usage
//!
//! ```bash
//! sku-pulse metrics
//! sku-pulse metrics --data week-14.yaml --json
//! ```

use std::io::Write;
use std::path::Path;

use sku_pulse_core::PortfolioMetrics;
use sku_pulse_dashboard::load_dataset;
use sku_pulse_dashboard::report::render_kpis;

/// Print portfolio KPIs as text or JSON.
///
/// Undefined ratios are `null` in JSON and `—` in text.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or stdout is closed.
pub async fn run(data: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_dataset(data).await?;
    let metrics = PortfolioMetrics::compute(&records);

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &metrics)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render_kpis(&metrics))?;
    }
    Ok(())
}
