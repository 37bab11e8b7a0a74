//! Sale and sale line-item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a sale request: the unit price is supplied by the caller
/// and captured as the price at time of sale, independent of later
/// product price changes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

/// Sale summary as returned by listing and report endpoints (no line items)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub id: Uuid,
    /// Optional reference to a registered client
    pub client_id: Option<Uuid>,
    /// Client name snapshot kept for historical display
    pub client_name: String,
    pub total: Decimal,
    /// Denormalized count of line items
    pub item_count: i32,
    pub payment_method: Option<String>,
    pub discount: Option<Decimal>,
    pub observation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A persisted line item joined with its product name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemDetail {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    /// Unit price captured at time of sale
    pub unit_price: Decimal,
}

/// Full sale view: summary fields plus expanded line items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub summary: SaleSummary,
    pub items: Vec<SaleItemDetail>,
}

/// Compute a sale total from its line items: sum of unit price times
/// quantity, rounded to 2 decimal places. The discount is never
/// subtracted here; it is recorded on the sale as informational only.
pub fn compute_total(items: &[SaleItemInput]) -> Decimal {
    items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum::<Decimal>()
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: i32, price: &str) -> SaleItemInput {
        SaleItemInput {
            product_id: Uuid::new_v4(),
            quantity,
            price: dec(price),
        }
    }

    #[test]
    fn test_total_single_item() {
        let total = compute_total(&[item(3, "10.00")]);
        assert_eq!(total, dec("30.00"));
    }

    #[test]
    fn test_total_multiple_items() {
        let total = compute_total(&[item(2, "5.50"), item(1, "19.90")]);
        assert_eq!(total, dec("30.90"));
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert_eq!(compute_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_total_rounds_to_two_decimals() {
        // 3 x 0.333 = 0.999 -> 1.00
        let total = compute_total(&[item(3, "0.333")]);
        assert_eq!(total, dec("1.00"));
    }

    /// The wire format is camelCase, matching the original API contract
    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = SaleSummary {
            id: Uuid::new_v4(),
            client_id: None,
            client_name: "Ana".to_string(),
            total: dec("30.00"),
            item_count: 1,
            payment_method: Some("cash".to_string()),
            discount: Some(dec("5.00")),
            observation: None,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["clientName"], "Ana");
        assert_eq!(value["itemCount"], 1);
        assert_eq!(value["paymentMethod"], "cash");
        assert!(value.get("client_name").is_none());
    }

    #[test]
    fn test_item_input_deserializes_camel_case() {
        let input: SaleItemInput = serde_json::from_str(
            r#"{"productId":"7f0c1a2e-8f33-4f2e-9be1-0d6a54c1d9aa","quantity":3,"price":"10.00"}"#,
        )
        .unwrap();

        assert_eq!(input.quantity, 3);
        assert_eq!(input.price, dec("10.00"));
    }
}
