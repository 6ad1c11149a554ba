//! # Error Types
//!
//! Domain-specific error types for jati-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  jati-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule failures                         │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ErrorKind        - Caller-facing taxonomy                         │
//! │                                                                         │
//! │  jati-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → OrderError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//!
//! Every failure the workflow surfaces collapses into one [`ErrorKind`]:
//!
//! | Kind              | Examples                                         |
//! |-------------------|--------------------------------------------------|
//! | `NotFound`        | unknown order, product or customer               |
//! | `InvalidArgument` | bad input, unknown enum value, overpayment       |
//! | `InvalidState`    | receipt for an unpaid order                      |
//! | `Persistence`     | storage failure (assigned by the db layer)       |

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Error Kind
// =============================================================================

/// Caller-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Referenced order, customer or product does not exist.
    NotFound,
    /// Structurally invalid input. The caller must correct and resubmit.
    InvalidArgument,
    /// Valid input that the entity's current state forbids.
    InvalidState,
    /// Underlying storage failure.
    Persistence,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Product referenced by an order item cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer referenced by an order cannot be found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Payment would push completed payments past the order total.
    ///
    /// ## When This Occurs
    /// ```text
    /// Order total:      $200.00
    /// Already paid:     $150.00
    /// Requested:         $60.00
    ///      │
    ///      ▼
    /// 150 + 60 = 210 > 200  ──►  PaymentExceedsTotal
    /// ```
    #[error("payment amount exceeds order total: requested {requested}, paid {paid} of {total}")]
    PaymentExceedsTotal {
        total: Money,
        paid: Money,
        requested: Money,
    },

    /// Receipt requested before the order is fully paid.
    #[error("cannot generate receipt for unpaid order {order_id}")]
    UnpaidOrder { order_id: String },

    /// Status change rejected by the strict transition table, or lost to a
    /// concurrent change.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: String,
        to: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::OrderNotFound(_)
            | CoreError::ProductNotFound(_)
            | CoreError::CustomerNotFound(_) => ErrorKind::NotFound,
            CoreError::PaymentExceedsTotal { .. } | CoreError::Validation(_) => {
                ErrorKind::InvalidArgument
            }
            CoreError::UnpaidOrder { .. } | CoreError::InvalidStatusTransition { .. } => {
                ErrorKind::InvalidState
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any lookup or write happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection that needs at least one element is empty.
    #[error("{field} must have at least one entry")]
    Empty { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Builds a `NotAllowed` error from a static list of accepted values.
    pub fn not_allowed(field: &str, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PaymentExceedsTotal {
            total: Money::from_cents(20_000),
            paid: Money::from_cents(15_000),
            requested: Money::from_cents(6_000),
        };
        assert_eq!(
            err.to_string(),
            "payment amount exceeds order total: requested $60.00, paid $150.00 of $200.00"
        );

        let err = CoreError::UnpaidOrder {
            order_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "cannot generate receipt for unpaid order abc");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Empty {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items must have at least one entry");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be greater than 0");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(CoreError::OrderNotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::CustomerNotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::UnpaidOrder { order_id: "x".into() }.kind(),
            ErrorKind::InvalidState
        );

        let core_err: CoreError = ValidationError::Required {
            field: "status".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::InvalidArgument);
    }
}
