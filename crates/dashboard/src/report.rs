//! Plain-text rendering of the dashboard.
//!
//! Undefined ratios always render as [`Ratio::PLACEHOLDER`], never as a
//! numeric artifact.

use std::fmt::Write;

use chrono::Local;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use sku_pulse_core::metrics::{chart_label, top_by_revenue};
use sku_pulse_core::{AnalysisResult, PortfolioMetrics, Ratio, RowMetrics, SkuRecord};

use crate::state::DashboardState;

const CURRENCY_SYMBOL: &str = "₹";
const TOP_PRODUCTS: usize = 12;
const FILL_BAR_CELLS: u32 = 10;

/// Render the whole dashboard: KPIs, top products, SKU table and analysis.
#[must_use]
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();
    out.push_str(&render_kpis(&state.metrics()));
    out.push('\n');
    out.push_str(&render_top_products(state.records()));
    out.push('\n');
    out.push_str(&render_table(state));
    out.push('\n');
    out.push_str(&render_analysis(state));
    out
}

/// KPI cards as aligned label/value lines.
#[must_use]
pub fn render_kpis(metrics: &PortfolioMetrics) -> String {
    let cards = [
        ("Total Revenue", format_inr(metrics.total_revenue)),
        ("Blended ROAS", format_multiple(metrics.avg_roas)),
        ("Total Ad Spend", format_inr(metrics.total_ad_spend)),
        ("Units Sold", group_thousands(&metrics.total_units_sold.to_string())),
        ("Portfolio CTR", format_percent(metrics.avg_ctr)),
        ("Portfolio CPC", format_inr_ratio(metrics.avg_cpc)),
    ];

    let mut out = String::from("PORTFOLIO\n");
    for (label, value) in cards {
        let _ = writeln!(out, "  {label:<16}{value}");
    }
    out
}

/// Top products by revenue, as chart labels with values.
#[must_use]
pub fn render_top_products(records: &[SkuRecord]) -> String {
    let mut out = String::from("TOP PRODUCTS\n");
    for (rank, sku) in top_by_revenue(records, TOP_PRODUCTS).iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<18} {:>14}",
            rank + 1,
            chart_label(&sku.name),
            format_inr(sku.sales)
        );
    }
    out
}

/// The SKU table with derived ROAS and inventory columns.
#[must_use]
pub fn render_table(state: &DashboardState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<30} {:<16} {:>12} {:>8}  {:>12}  INVENTORY",
        "SKU", "CATEGORY", "REVENUE", "ROAS", "STOCK"
    );
    for (sku, row) in state.rows() {
        let stock = format!("{} Units", sku.current_stock);
        let _ = writeln!(
            out,
            "{:<30} {:<16} {:>12} {:>8}  {:>12}  {}{}",
            truncate(&sku.name, 30),
            truncate(&sku.category, 16),
            format_inr(sku.sales),
            roas_badge(&row),
            stock,
            fill_bar(&row),
            if row.is_low_stock { " LOW" } else { "" },
        );
    }
    out
}

/// The analysis panel: loading, error, result, or the idle hint.
#[must_use]
pub fn render_analysis(state: &DashboardState) -> String {
    let mut out = String::from("AI INSIGHTS\n");
    if state.is_loading() {
        out.push_str("  AI Analyzing Portfolio...\n");
    }
    if let Some(error) = state.error() {
        let _ = writeln!(out, "  {error}");
    }
    match state.analysis() {
        Some(analysis) => out.push_str(&render_analysis_result(analysis)),
        None if !state.is_loading() && state.error().is_none() => {
            out.push_str("  Run `sku-pulse analyze` to generate AI insights.\n");
        }
        None => {}
    }
    out
}

fn render_analysis_result(analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  Health: {}    Updated: {}",
        analysis.overall_health,
        analysis.timestamp.with_timezone(&Local).format("%H:%M:%S")
    );
    out.push('\n');
    for line in analysis.summary.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

/// ROAS with a marker when it meets the efficiency target.
fn roas_badge(row: &RowMetrics) -> String {
    if row.roas.is_undefined() {
        return Ratio::PLACEHOLDER.to_string();
    }
    let marker = if row.meets_roas_target() { "+" } else { "!" };
    format!("{}{marker}", format_multiple(row.roas))
}

/// A fixed-width bar for the clamped stock level.
fn fill_bar(row: &RowMetrics) -> String {
    let cells = Decimal::from(FILL_BAR_CELLS);
    let filled = (row.fill_pct() * cells / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
        .min(FILL_BAR_CELLS);

    let mut bar = "█".repeat(filled as usize);
    bar.push_str(&"░".repeat((FILL_BAR_CELLS - filled) as usize));
    bar
}

/// Format a rupee amount with thousands grouping (`₹1,636,900`).
///
/// Whole amounts drop the fraction; others keep two decimal places.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let fraction = abs - whole;

    let grouped = group_thousands(&whole.to_string());
    if fraction.is_zero() {
        format!("{sign}{CURRENCY_SYMBOL}{grouped}")
    } else {
        let cents = format!("{fraction:.2}");
        let cents = cents.trim_start_matches('0');
        format!("{sign}{CURRENCY_SYMBOL}{grouped}{cents}")
    }
}

fn format_inr_ratio(ratio: Ratio) -> String {
    ratio
        .value()
        .map_or_else(|| Ratio::PLACEHOLDER.to_string(), format_inr)
}

/// `4.00x`, or the placeholder.
fn format_multiple(ratio: Ratio) -> String {
    if ratio.is_undefined() {
        Ratio::PLACEHOLDER.to_string()
    } else {
        format!("{ratio:.2}x")
    }
}

/// `2.41%`, or the placeholder.
fn format_percent(ratio: Ratio) -> String {
    if ratio.is_undefined() {
        Ratio::PLACEHOLDER.to_string()
    } else {
        format!("{ratio:.2}%")
    }
}

/// Insert `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        text.to_string()
    }
}
