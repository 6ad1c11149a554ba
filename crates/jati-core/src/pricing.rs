//! # Pricing Calculator
//!
//! Turns resolved order lines into line totals and order aggregates.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  per line:   line_total = max(0, unit_price × quantity − discount)     │
//! │  order:      subtotal   = Σ line_total                                  │
//! │              total      = max(0, subtotal + tax − order_discount)       │
//! │                                                                         │
//! │  Example:   $100.00 × 2 − $10.00          = $190.00  (subtotal)        │
//! │             $190.00 + $15.00 − $5.00      = $200.00  (total)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discounts larger than what they apply to clamp to zero instead of
//! failing. Quantities and discounts are validated by the caller
//! (see [`crate::validation::validate_new_order`]) before pricing runs.

use crate::money::Money;
use crate::types::{OrderDraft, OrderItemDraft};

/// One resolved order line: the product's price at this instant plus the
/// requested quantity and discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLine {
    pub product_id: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub discount: Money,
}

impl PriceLine {
    pub fn new(
        product_id: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        discount: Money,
    ) -> Self {
        PriceLine {
            product_id: product_id.into(),
            unit_price,
            quantity,
            discount,
        }
    }

    /// `max(0, unit_price × quantity − discount)`.
    pub fn total(&self) -> Money {
        line_total(self.unit_price, self.quantity, self.discount)
    }
}

/// Pricing result for a whole order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub items: Vec<OrderItemDraft>,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

impl PricedOrder {
    /// Converts the pricing result into an insertable draft.
    pub fn into_draft(self, customer_id: Option<String>, notes: Option<String>) -> OrderDraft {
        OrderDraft {
            customer_id,
            subtotal_cents: self.subtotal.cents(),
            tax_cents: self.tax.cents(),
            discount_cents: self.discount.cents(),
            total_cents: self.total.cents(),
            notes,
            items: self.items,
        }
    }
}

/// Line total with the zero floor.
///
/// ## Example
/// ```rust
/// use jati_core::money::Money;
/// use jati_core::pricing::line_total;
///
/// let total = line_total(Money::from_cents(500), 2, Money::from_cents(1_500));
/// assert!(total.is_zero()); // discount exceeds $10.00 line
/// ```
pub fn line_total(unit_price: Money, quantity: i64, discount: Money) -> Money {
    (unit_price.multiply_quantity(quantity) - discount).floor_zero()
}

/// Order total with the zero floor.
pub fn order_total(subtotal: Money, tax: Money, discount: Money) -> Money {
    (subtotal + tax - discount).floor_zero()
}

/// Prices a full order.
///
/// Pure: same lines in, same totals out. Never fails.
pub fn price_order(lines: &[PriceLine], tax: Money, discount: Money) -> PricedOrder {
    let items: Vec<OrderItemDraft> = lines
        .iter()
        .map(|line| OrderItemDraft {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price_cents: line.unit_price.cents(),
            discount_cents: line.discount.cents(),
            total_price_cents: line.total().cents(),
        })
        .collect();

    let subtotal: Money = items
        .iter()
        .map(|item| Money::from_cents(item.total_price_cents))
        .sum();

    PricedOrder {
        total: order_total(subtotal, tax, discount),
        items,
        subtotal,
        tax,
        discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(v: i64) -> Money {
        Money::from_cents(v)
    }

    #[test]
    fn test_reference_order() {
        let lines = [PriceLine::new("p-1", cents(10_000), 2, cents(1_000))];
        let priced = price_order(&lines, cents(1_500), cents(500));

        assert_eq!(priced.items[0].total_price_cents, 19_000);
        assert_eq!(priced.subtotal, cents(19_000));
        assert_eq!(priced.total, cents(20_000));
    }

    #[test]
    fn test_line_total_never_negative() {
        for price in [0, 1, 99, 10_000] {
            for qty in [1, 2, 7, 1_000] {
                for discount in [0, 1, 500, 10_000_000] {
                    let total = line_total(cents(price), qty, cents(discount));
                    assert!(!total.is_negative());
                    assert_eq!(total.cents(), (price * qty - discount).max(0));
                }
            }
        }
    }

    #[test]
    fn test_order_total_never_negative() {
        for subtotal in [0, 100, 19_000] {
            for tax in [0, 50, 1_500] {
                for discount in [0, 500, 1_000_000] {
                    let total = order_total(cents(subtotal), cents(tax), cents(discount));
                    assert_eq!(total.cents(), (subtotal + tax - discount).max(0));
                }
            }
        }
    }

    #[test]
    fn test_oversized_item_discount_does_not_leak_into_other_lines() {
        let lines = [
            PriceLine::new("a", cents(500), 1, cents(2_000)),
            PriceLine::new("b", cents(300), 2, cents(0)),
        ];
        let priced = price_order(&lines, Money::zero(), Money::zero());

        assert_eq!(priced.items[0].total_price_cents, 0);
        assert_eq!(priced.items[1].total_price_cents, 600);
        assert_eq!(priced.subtotal, cents(600));
    }

    #[test]
    fn test_unit_price_is_snapshotted() {
        let lines = [PriceLine::new("a", cents(1_234), 3, cents(4))];
        let draft = price_order(&lines, cents(0), cents(0)).into_draft(None, Some("n".into()));

        assert_eq!(draft.items[0].unit_price_cents, 1_234);
        assert_eq!(draft.items[0].discount_cents, 4);
        assert_eq!(draft.subtotal_cents, 3_698);
        assert_eq!(draft.notes.as_deref(), Some("n"));
    }
}
