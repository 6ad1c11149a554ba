//! # Domain Types
//!
//! Core domain types used throughout Jati POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  owns  ┌─────────────────┐                        │
//! │  │      Order      │───────►│    OrderItem    │  (snapshot of price)   │
//! │  │  ─────────────  │  1..n  │  ─────────────  │                        │
//! │  │  id (UUID)      │        │  product_id     │                        │
//! │  │  order_number   │        │  quantity       │                        │
//! │  │  status         │        │  unit_price     │                        │
//! │  │  payment_status │        │  total_price    │                        │
//! │  │  total_cents    │        └─────────────────┘                        │
//! │  └────────┬────────┘                                                    │
//! │           │ 0..n                      0..1                              │
//! │           ├──────────────► Payment    ─────────► Receipt               │
//! │           │                amount_cents           receipt_number        │
//! │           │                method, status         total/tax snapshot    │
//! │                                                                         │
//! │  Collaborators: Product (price source), Customer (optional owner)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every persisted entity has:
//! - `id`: UUID v4, used for relations and URLs
//! - Business ID: `order_number` / `receipt_number`, sequential and human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Enum helper
// =============================================================================

/// Implements `as_str`, `Display` and `FromStr` for a unit-only enum whose
/// storage form is the snake_case variant name.
macro_rules! string_enum {
    ($ty:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Every accepted textual value, in declaration order.
            pub const ALL: &'static [&'static str] = &[$($text),+];

            /// Storage / wire representation.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    _ => Err(ValidationError::not_allowed($field, $ty::ALL)),
                }
            }
        }
    };
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment status of an order.
///
/// ```text
///            ┌──────────► completed
///  pending ──┤
///            └──────────► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

string_enum!(OrderStatus, "status", {
    Pending => "pending",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl OrderStatus {
    /// Whether the strict transition table allows `self -> next`.
    ///
    /// Only `pending` may move, and only to a terminal state. Re-applying
    /// the current status is always accepted.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        *self == next
            || matches!(
                (self, next),
                (OrderStatus::Pending, OrderStatus::Completed)
                    | (OrderStatus::Pending, OrderStatus::Cancelled)
            )
    }
}

// =============================================================================
// Order Payment Status
// =============================================================================

/// Payment axis of an order, independent from [`OrderStatus`].
///
/// `Refunded` is declared for schema compatibility; no operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderPaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

string_enum!(OrderPaymentStatus, "payment_status", {
    Pending => "pending",
    Paid => "paid",
    Refunded => "refunded",
});

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Card on an external terminal.
    Card,
    /// Bank transfer.
    Transfer,
    /// E-wallet / QR payment.
    DigitalWallet,
}

string_enum!(PaymentMethod, "payment_method", {
    Cash => "cash",
    Card => "card",
    Transfer => "transfer",
    DigitalWallet => "digital_wallet",
});

// =============================================================================
// Payment Status
// =============================================================================

/// Status of a single payment record.
///
/// Payments are settled immediately, so the workflow only ever writes
/// `Completed`. Only completed payments count towards the order balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

string_enum!(PaymentStatus, "payment_status", {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

// =============================================================================
// Product & Customer (collaborators)
// =============================================================================

/// A product that order items can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Stock Keeping Unit, unique when present.
    pub sku: Option<String>,
    /// Current list price in cents. Copied into order items at creation.
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the list price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A customer that orders can optionally belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// An order with its line items.
///
/// `total_cents` is always `max(0, subtotal + tax - discount)`; it is derived
/// by [`crate::pricing`] and never accepted from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    /// `ORD-<n>`, assigned by the storage sequence at insert time.
    pub order_number: String,
    pub customer_id: Option<String>,
    pub status: OrderStatus,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_status: OrderPaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<OrderItem>,
}

impl Order {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Whether completed payments have covered the total.
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.payment_status == OrderPaymentStatus::Paid
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern: `unit_price_cents` is frozen at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in cents at time of ordering (frozen).
    pub unit_price_cents: i64,
    /// Per-line discount in cents. May exceed the line subtotal.
    pub discount_cents: i64,
    /// `max(0, quantity × unit_price − discount)`.
    pub total_price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A payment towards an order.
/// An order can have multiple payments (split tender, retries).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    /// Amount paid in cents, always > 0.
    pub amount_cents: i64,
    pub method: PaymentMethod,
    /// External reference (card auth code, transfer id, ...).
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Proof of a fully paid order. At most one per order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receipt {
    pub id: String,
    pub order_id: String,
    /// `RCP-<n>`, assigned by the storage sequence at insert time.
    pub receipt_number: String,
    /// Order total at issuance (snapshot).
    pub total_cents: i64,
    /// Order tax at issuance (snapshot).
    pub tax_cents: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Workflow Inputs
// =============================================================================

/// A requested order line before product resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: String,
    pub quantity: i64,
    pub discount_cents: i64,
}

/// A request to create an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: Option<String>,
    pub items: Vec<NewOrderItem>,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub notes: Option<String>,
}

/// A request to apply a payment to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

/// A priced line, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemDraft {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub discount_cents: i64,
    pub total_price_cents: i64,
}

/// A fully priced order, ready for atomic insertion.
///
/// The storage layer assigns `id`, `order_number` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer_id: Option<String>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub notes: Option<String>,
    pub items: Vec<OrderItemDraft>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("cancelled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("Pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_payment_method_round_trip_text() {
        for text in PaymentMethod::ALL {
            let method: PaymentMethod = text.parse().unwrap();
            assert_eq!(method.as_str(), *text);
        }
        let err = "bitcoin".parse::<PaymentMethod>().unwrap_err();
        assert!(err.to_string().contains("digital_wallet"));
    }

    #[test]
    fn test_serde_names_match_storage_names() {
        let json = serde_json::to_string(&PaymentMethod::DigitalWallet).unwrap();
        assert_eq!(json, "\"digital_wallet\"");
        let json = serde_json::to_string(&OrderPaymentStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
    }

    #[test]
    fn test_strict_transitions() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Pending.can_transition_to(Pending));
        assert!(Completed.can_transition_to(Completed));

        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Completed));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderPaymentStatus::default(), OrderPaymentStatus::Pending);
    }
}
