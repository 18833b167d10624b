//! The SKU record, the single input entity of the dashboard.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock-keeping unit identifier (e.g. `"SKU-001"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuId(String);

impl SkuId {
    /// Create a new SKU identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkuId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Weekly performance of one sellable product variant.
///
/// Keys are camelCase on the wire so datasets exported from the browser
/// dashboard load unchanged. `current_stock <= total_capacity` is expected but
/// not enforced: overstock beyond nominal capacity is a legitimate state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuRecord {
    /// Unique identifier.
    pub id: SkuId,
    /// Product name.
    pub name: String,
    /// Free-text category label.
    pub category: String,
    /// Revenue for the period.
    pub sales: Decimal,
    /// Units sold in the period.
    pub units_sold: u64,
    /// Advertising spend for the period.
    pub ad_spend: Decimal,
    /// Ad impressions.
    pub impressions: u64,
    /// Ad clicks.
    pub clicks: u64,
    /// Conversion rate as a fraction (0-1).
    pub conversion_rate: Decimal,
    /// Units currently in stock.
    pub current_stock: u64,
    /// Nominal storage capacity in units.
    pub total_capacity: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "SKU-001",
            "name": "Charcoal Face Wash",
            "category": "Skin Care",
            "sales": 45200,
            "unitsSold": 226,
            "adSpend": 11300.50,
            "impressions": 98000,
            "clicks": 2450,
            "conversionRate": 0.092,
            "currentStock": 120,
            "totalCapacity": 500
        }"#;

        let sku: SkuRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(sku.id.as_str(), "SKU-001");
        assert_eq!(sku.sales, Decimal::from(45200));
        assert_eq!(sku.ad_spend, Decimal::new(1_130_050, 2));
        assert_eq!(sku.units_sold, 226);
        assert_eq!(sku.conversion_rate, Decimal::new(92, 3));
        assert_eq!(sku.total_capacity, 500);
    }

    #[test]
    fn test_serialize_keeps_every_field() {
        let sku = SkuRecord {
            id: SkuId::new("SKU-009"),
            name: "Beard Oil".to_string(),
            category: "Beard Care".to_string(),
            sales: Decimal::from(1000),
            units_sold: 10,
            ad_spend: Decimal::from(250),
            impressions: 4000,
            clicks: 80,
            conversion_rate: Decimal::new(125, 3),
            current_stock: 40,
            total_capacity: 200,
        };

        let value = serde_json::to_value(&sku).expect("serialize");
        let object = value.as_object().expect("object");
        for key in [
            "id",
            "name",
            "category",
            "sales",
            "unitsSold",
            "adSpend",
            "impressions",
            "clicks",
            "conversionRate",
            "currentStock",
            "totalCapacity",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_sku_id_display() {
        assert_eq!(SkuId::from("SKU-42").to_string(), "SKU-42");
    }
}
