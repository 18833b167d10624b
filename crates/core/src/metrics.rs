//! Portfolio KPIs and per-row derived fields.
//!
//! Everything here is a pure function of the SKU slice. Results are cheap
//! enough to recompute on every dataset change; callers may cache them but
//! correctness never depends on it.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Ratio, SkuRecord};

/// Stock level (percent of capacity) below which a SKU is flagged.
pub const LOW_STOCK_THRESHOLD_PCT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// ROAS at or above which a SKU meets the efficiency target.
pub const ROAS_TARGET: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Chart labels longer than this are truncated.
pub const CHART_LABEL_MAX_CHARS: usize = 15;

/// Portfolio-level KPIs over the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    /// Σ sales.
    pub total_revenue: Decimal,
    /// Σ ad spend.
    pub total_ad_spend: Decimal,
    /// Blended return on ad spend, undefined when nothing was spent.
    #[serde(rename = "avgROAS")]
    pub avg_roas: Ratio,
    pub total_units_sold: u64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    /// Click-through rate in percent, undefined without impressions.
    #[serde(rename = "avgCTR")]
    pub avg_ctr: Ratio,
    /// Cost per click, undefined without clicks.
    #[serde(rename = "avgCPC")]
    pub avg_cpc: Ratio,
}

impl PortfolioMetrics {
    /// Aggregate an ordered, possibly empty, collection of SKUs.
    #[must_use]
    pub fn compute(records: &[SkuRecord]) -> Self {
        let total_revenue: Decimal = records.iter().map(|sku| sku.sales).sum();
        let total_ad_spend: Decimal = records.iter().map(|sku| sku.ad_spend).sum();
        let total_units_sold = records.iter().map(|sku| sku.units_sold).sum();
        let total_impressions: u64 = records.iter().map(|sku| sku.impressions).sum();
        let total_clicks: u64 = records.iter().map(|sku| sku.clicks).sum();

        Self {
            total_revenue,
            total_ad_spend,
            avg_roas: Ratio::of(total_revenue, total_ad_spend),
            total_units_sold,
            total_impressions,
            total_clicks,
            avg_ctr: Ratio::percent(Decimal::from(total_clicks), Decimal::from(total_impressions)),
            avg_cpc: Ratio::of(total_ad_spend, Decimal::from(total_clicks)),
        }
    }
}

/// Display-ready fields derived from a single SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowMetrics {
    /// sales / ad spend, undefined when nothing was spent.
    pub roas: Ratio,
    /// current stock / capacity × 100. May exceed 100 when overstocked.
    pub stock_level_pct: Ratio,
    /// Stock level strictly below [`LOW_STOCK_THRESHOLD_PCT`].
    pub is_low_stock: bool,
}

impl RowMetrics {
    /// Derive the row fields for one SKU.
    #[must_use]
    pub fn derive(sku: &SkuRecord) -> Self {
        let roas = Ratio::of(sku.sales, sku.ad_spend);
        let stock_level_pct = Ratio::percent(
            Decimal::from(sku.current_stock),
            Decimal::from(sku.total_capacity),
        );
        // An undefined level (zero capacity) is not flagged.
        let is_low_stock = stock_level_pct
            .value()
            .is_some_and(|pct| pct < LOW_STOCK_THRESHOLD_PCT);

        Self {
            roas,
            stock_level_pct,
            is_low_stock,
        }
    }

    /// Whether the SKU's ROAS reaches [`ROAS_TARGET`].
    #[must_use]
    pub fn meets_roas_target(&self) -> bool {
        self.roas.value().is_some_and(|roas| roas >= ROAS_TARGET)
    }

    /// Stock level clamped to `[0, 100]` for a fill indicator.
    ///
    /// The raw [`stock_level_pct`](Self::stock_level_pct) is left untouched.
    #[must_use]
    pub fn fill_pct(&self) -> Decimal {
        self.stock_level_pct
            .clamp_or_min(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

/// The `n` highest-revenue SKUs, highest first. Ties keep input order.
#[must_use]
pub fn top_by_revenue(records: &[SkuRecord], n: usize) -> Vec<&SkuRecord> {
    let mut ranked: Vec<&SkuRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.sales.cmp(&a.sales));
    ranked.truncate(n);
    ranked
}

/// Short product label for chart axes.
#[must_use]
pub fn chart_label(name: &str) -> String {
    if name.chars().count() > CHART_LABEL_MAX_CHARS {
        let truncated: String = name.chars().take(CHART_LABEL_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkuId;

    fn sku(id: &str, sales: i64, ad_spend: i64, current_stock: u64, total_capacity: u64) -> SkuRecord {
        SkuRecord {
            id: SkuId::new(id),
            name: format!("Product {id}"),
            category: "Test".to_string(),
            sales: Decimal::from(sales),
            units_sold: 1,
            ad_spend: Decimal::from(ad_spend),
            impressions: 1000,
            clicks: 20,
            conversion_rate: Decimal::new(5, 2),
            current_stock,
            total_capacity,
        }
    }

    #[test]
    fn test_portfolio_totals() {
        let records = vec![
            sku("A", 100, 50, 10, 100),
            sku("B", 200, 50, 10, 100),
            sku("C", 300, 50, 10, 100),
        ];

        let metrics = PortfolioMetrics::compute(&records);

        assert_eq!(metrics.total_revenue, Decimal::from(600));
        assert_eq!(metrics.total_ad_spend, Decimal::from(150));
        assert_eq!(metrics.avg_roas.value(), Some(Decimal::from(4)));
        assert_eq!(format!("{:.2}", metrics.avg_roas), "4.00");
    }

    #[test]
    fn test_portfolio_totals_are_order_independent() {
        let mut records = vec![
            sku("A", 120, 35, 10, 100),
            sku("B", 999, 1, 10, 100),
            sku("C", 7, 0, 10, 100),
        ];
        let forward = PortfolioMetrics::compute(&records);
        records.reverse();
        let reversed = PortfolioMetrics::compute(&records);
        records.swap(0, 1);
        let shuffled = PortfolioMetrics::compute(&records);

        assert_eq!(forward, reversed);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_empty_portfolio() {
        let metrics = PortfolioMetrics::compute(&[]);

        assert_eq!(metrics.total_revenue, Decimal::ZERO);
        assert_eq!(metrics.total_ad_spend, Decimal::ZERO);
        assert!(metrics.avg_roas.is_undefined());
        assert!(metrics.avg_ctr.is_undefined());
        assert!(metrics.avg_cpc.is_undefined());
        assert_eq!(metrics.avg_roas.to_string(), Ratio::PLACEHOLDER);
    }

    #[test]
    fn test_ctr_and_cpc() {
        let records = vec![sku("A", 100, 50, 10, 100), sku("B", 100, 30, 10, 100)];
        let metrics = PortfolioMetrics::compute(&records);

        // 40 clicks / 2000 impressions
        assert_eq!(metrics.avg_ctr.value(), Some(Decimal::from(2)));
        // 80 spend / 40 clicks
        assert_eq!(metrics.avg_cpc.value(), Some(Decimal::from(2)));
    }

    #[test]
    fn test_row_roas() {
        let row = RowMetrics::derive(&sku("A", 450, 100, 10, 100));
        assert_eq!(row.roas.value(), Some(Decimal::new(45, 1)));
        assert!(row.meets_roas_target());
    }

    #[test]
    fn test_row_roas_zero_spend_is_undefined() {
        let row = RowMetrics::derive(&sku("A", 450, 0, 10, 100));
        assert!(row.roas.is_undefined());
        assert!(!row.meets_roas_target());
    }

    #[test]
    fn test_roas_target_boundary() {
        assert!(RowMetrics::derive(&sku("A", 300, 100, 10, 100)).meets_roas_target());
        assert!(!RowMetrics::derive(&sku("A", 299, 100, 10, 100)).meets_roas_target());
    }

    #[test]
    fn test_low_stock() {
        let row = RowMetrics::derive(&sku("A", 1, 1, 10, 50));
        assert_eq!(row.stock_level_pct.value(), Some(Decimal::from(20)));
        assert!(row.is_low_stock);
    }

    #[test]
    fn test_low_stock_boundary_is_not_low() {
        let row = RowMetrics::derive(&sku("A", 1, 1, 15, 50));
        assert_eq!(row.stock_level_pct.value(), Some(Decimal::from(30)));
        assert!(!row.is_low_stock);

        let row = RowMetrics::derive(&sku("A", 1, 1, 3, 10));
        assert!(!row.is_low_stock);

        let row = RowMetrics::derive(&sku("A", 1, 1, 299, 1000));
        assert!(row.is_low_stock);
    }

    #[test]
    fn test_above_threshold_is_not_low() {
        let row = RowMetrics::derive(&sku("A", 1, 1, 31, 100));
        assert!(!row.is_low_stock);
    }

    #[test]
    fn test_zero_capacity() {
        let row = RowMetrics::derive(&sku("A", 1, 1, 5, 0));
        assert!(row.stock_level_pct.is_undefined());
        assert!(!row.is_low_stock);
        assert_eq!(row.fill_pct(), Decimal::ZERO);
    }

    #[test]
    fn test_fill_pct_clamps_overstock() {
        let row = RowMetrics::derive(&sku("A", 1, 1, 150, 100));
        assert_eq!(row.stock_level_pct.value(), Some(Decimal::from(150)));
        assert_eq!(row.fill_pct(), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_top_by_revenue() {
        let records = vec![
            sku("A", 100, 1, 1, 1),
            sku("B", 300, 1, 1, 1),
            sku("C", 200, 1, 1, 1),
            sku("D", 300, 1, 1, 1),
        ];

        let top: Vec<&str> = top_by_revenue(&records, 3)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(top, vec!["B", "D", "C"]);
    }

    #[test]
    fn test_top_by_revenue_more_than_available() {
        let records = vec![sku("A", 100, 1, 1, 1)];
        assert_eq!(top_by_revenue(&records, 12).len(), 1);
    }

    #[test]
    fn test_chart_label() {
        assert_eq!(chart_label("Beard Oil"), "Beard Oil");
        assert_eq!(chart_label("Activated Charcoal Face Wash"), "Activated Charc...");
        assert_eq!(chart_label("Exactly 15 char"), "Exactly 15 char");
    }
}
