//! # Validation Module
//!
//! Input validation for the order workflow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler                                                  │
//! │  └── Body shape (serde), enum names                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow engine                                               │
//! │  └── THIS MODULE: ids, quantities, discounts, amounts                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (quantity > 0, amount > 0, ...)                 │
//! │  ├── UNIQUE constraints (order_number, receipts.order_id)              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jati_core::validation::{validate_id, validate_quantity};
//!
//! validate_id("order_id", "550e8400-e29b-41d4-a716-446655440000").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::NewOrder;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product or customer name.
pub const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// Identifiers
// =============================================================================

/// Validates that `id` is a UUID.
///
/// `field` names the offending input in the error message.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Item quantity must be strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Discounts, tax and prices must not be negative.
pub fn validate_non_negative(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Payment amount must be strictly positive.
pub fn validate_payment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product or customer).
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most [`MAX_NAME_LENGTH`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates an order request before any lookup happens.
///
/// ## Rules
/// - At least one item
/// - Every `product_id` (and `customer_id` when given) is a UUID
/// - Every quantity > 0, every item discount ≥ 0
/// - Order tax ≥ 0 and order discount ≥ 0
pub fn validate_new_order(order: &NewOrder) -> ValidationResult<()> {
    if order.items.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    if let Some(customer_id) = &order.customer_id {
        validate_id("customer_id", customer_id)?;
    }

    for item in &order.items {
        validate_id("product_id", &item.product_id)?;
        validate_quantity(item.quantity)?;
        validate_non_negative("discount", item.discount_cents)?;
    }

    validate_non_negative("tax_amount", order.tax_cents)?;
    validate_non_negative("discount_amount", order.discount_cents)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewOrderItem;

    const PRODUCT: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn order(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            items,
            ..NewOrder::default()
        }
    }

    fn item(quantity: i64, discount_cents: i64) -> NewOrderItem {
        NewOrderItem {
            product_id: PRODUCT.to_string(),
            quantity,
            discount_cents,
        }
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("id", PRODUCT).is_ok());
        assert!(matches!(
            validate_id("id", "  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_id("order_id", "not-a-uuid"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());

        assert!(validate_non_negative("tax_amount", 0).is_ok());
        assert!(validate_non_negative("tax_amount", -1).is_err());

        assert!(validate_payment_amount(1).is_ok());
        assert!(validate_payment_amount(0).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Kopi Susu").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert!(matches!(
            validate_name("name", &"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_new_order() {
        assert!(validate_new_order(&order(vec![item(2, 0)])).is_ok());

        assert!(matches!(
            validate_new_order(&order(vec![])),
            Err(ValidationError::Empty { .. })
        ));
        assert!(validate_new_order(&order(vec![item(0, 0)])).is_err());
        assert!(validate_new_order(&order(vec![item(1, -5)])).is_err());

        let mut bad_tax = order(vec![item(1, 0)]);
        bad_tax.tax_cents = -1;
        assert!(validate_new_order(&bad_tax).is_err());

        let mut bad_discount = order(vec![item(1, 0)]);
        bad_discount.discount_cents = -1;
        assert!(validate_new_order(&bad_discount).is_err());

        let mut bad_customer = order(vec![item(1, 0)]);
        bad_customer.customer_id = Some("42".to_string());
        assert!(validate_new_order(&bad_customer).is_err());
    }
}
