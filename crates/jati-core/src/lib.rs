//! # jati-core: Pure Business Logic for Jati POS
//!
//! Everything the order workflow decides without touching storage lives
//! here: money arithmetic, order pricing, the payment cap, status rules and
//! input validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Jati POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST API (apps/api)                          │   │
//! │  │   POST /orders ──► POST /payments ──► POST /receipt             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Order Workflow Engine (apps/api)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ jati-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌──────────┐ ┌───────┐  │   │
//! │  │   │  types  │ │  money  │ │ pricing  │ │settlement│ │ valid.│  │   │
//! │  │   │  Order  │ │  Money  │ │ line tot.│ │ pay cap  │ │ rules │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └──────────┘ └───────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    jati-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, OrderItem, Payment, Receipt, ...)
//! - [`money`] - Integer-cents money type
//! - [`pricing`] - Line totals, subtotal and total with zero floors
//! - [`settlement`] - Payment cap and paid-transition decision
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types and the error taxonomy
//!
//! ## Example Usage
//!
//! ```rust
//! use jati_core::money::Money;
//! use jati_core::pricing::{price_order, PriceLine};
//!
//! let lines = [PriceLine::new("p-1", Money::from_cents(10_000), 2, Money::from_cents(1_000))];
//! let priced = price_order(&lines, Money::from_cents(1_500), Money::from_cents(500));
//!
//! assert_eq!(priced.subtotal.cents(), 19_000);
//! assert_eq!(priced.total.cents(), 20_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of human-readable order numbers (`ORD-1000`).
pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Prefix of human-readable receipt numbers (`RCP-1000`).
pub const RECEIPT_NUMBER_PREFIX: &str = "RCP-";

/// First value handed out by the order and receipt sequences.
///
/// The storage layer seeds its counters at `SEQUENCE_START - 1`.
pub const SEQUENCE_START: i64 = 1000;

/// Formats a sequence value as an order number.
///
/// ```rust
/// assert_eq!(jati_core::format_order_number(1000), "ORD-1000");
/// ```
pub fn format_order_number(value: i64) -> String {
    format!("{}{}", ORDER_NUMBER_PREFIX, value)
}

/// Formats a sequence value as a receipt number.
///
/// ```rust
/// assert_eq!(jati_core::format_receipt_number(1042), "RCP-1042");
/// ```
pub fn format_receipt_number(value: i64) -> String {
    format!("{}{}", RECEIPT_NUMBER_PREFIX, value)
}
