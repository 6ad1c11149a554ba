//! # Payment Settlement
//!
//! Decides whether a payment may be applied to an order and whether it
//! settles the order.
//!
//! ```text
//!  already_paid + amount  >  total   ──►  reject (PaymentExceedsTotal)
//!  already_paid + amount  == total   ──►  accept, order becomes `paid`
//!  already_paid + amount  <  total   ──►  accept, order stays `pending`
//! ```
//!
//! The decision is pure. The storage layer runs it while holding the order's
//! write lock, so `already_paid` cannot change between check and insert.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_payment_amount;

/// Outcome of an accepted payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Completed payments including this one.
    pub paid_after: Money,
    /// Amount still owed after this payment.
    pub remaining: Money,
    /// Whether this payment covers the total.
    pub settles_order: bool,
}

/// Checks `amount` against the order balance.
///
/// ## Errors
/// - `Validation(MustBePositive)` if `amount <= 0`
/// - `PaymentExceedsTotal` if the payment would overshoot the total
///
/// ## Example
/// ```rust
/// use jati_core::money::Money;
/// use jati_core::settlement::assess_payment;
///
/// let total = Money::from_cents(20_000);
/// let first = assess_payment(total, Money::zero(), Money::from_cents(10_000)).unwrap();
/// assert!(!first.settles_order);
///
/// let second = assess_payment(total, first.paid_after, Money::from_cents(10_000)).unwrap();
/// assert!(second.settles_order);
/// ```
pub fn assess_payment(total: Money, already_paid: Money, amount: Money) -> CoreResult<Settlement> {
    validate_payment_amount(amount.cents())?;

    let paid_after = already_paid + amount;
    if paid_after > total {
        return Err(CoreError::PaymentExceedsTotal {
            total,
            paid: already_paid,
            requested: amount,
        });
    }

    Ok(Settlement {
        paid_after,
        remaining: total - paid_after,
        settles_order: paid_after >= total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
