//! Validation helpers for the VendyX sale workflow
//!
//! Pure checks shared by the backend services and the test suite.

use rust_decimal::Decimal;

use crate::models::SaleItemInput;

/// Validate the client name attached to a sale
pub fn validate_client_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Client name is required");
    }
    Ok(())
}

/// Validate the line items of a sale request
pub fn validate_sale_items(items: &[SaleItemInput]) -> Result<(), &'static str> {
    if items.is_empty() {
        return Err("A sale must have at least one item");
    }
    for item in items {
        if item.quantity <= 0 {
            return Err("Item quantity must be positive");
        }
        if item.price < Decimal::ZERO {
            return Err("Item price cannot be negative");
        }
    }
    Ok(())
}

/// Validate an optional discount against the sale subtotal
pub fn validate_discount(discount: Option<Decimal>, subtotal: Decimal) -> Result<(), &'static str> {
    if let Some(d) = discount {
        if d < Decimal::ZERO {
            return Err("Discount cannot be negative");
        }
        if d > subtotal {
            return Err("Discount cannot exceed the sale subtotal");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::compute_total;
    use std::str::FromStr;
    use uuid::Uuid;

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
    fn test_client_name_required() {
        assert!(validate_client_name("Ana").is_ok());
        assert!(validate_client_name("").is_err());
        assert!(validate_client_name("   ").is_err());
    }

    #[test]
    fn test_empty_items_rejected() {
        assert!(validate_sale_items(&[]).is_err());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(validate_sale_items(&[item(0, "10.00")]).is_err());
        assert!(validate_sale_items(&[item(-2, "10.00")]).is_err());
        assert!(validate_sale_items(&[item(1, "10.00")]).is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(validate_sale_items(&[item(1, "-0.01")]).is_err());
        // Zero price is allowed (giveaways)
        assert!(validate_sale_items(&[item(1, "0.00")]).is_ok());
    }

    #[test]
    fn test_discount_bounds() {
        let subtotal = compute_total(&[item(3, "10.00")]);
        assert!(validate_discount(None, subtotal).is_ok());
        assert!(validate_discount(Some(dec("5.00")), subtotal).is_ok());
        assert!(validate_discount(Some(dec("30.00")), subtotal).is_ok());
        assert!(validate_discount(Some(dec("30.01")), subtotal).is_err());
        assert!(validate_discount(Some(dec("-1.00")), subtotal).is_err());
    }
}
