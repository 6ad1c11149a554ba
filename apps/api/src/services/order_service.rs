//! # Order Workflow Engine
//!
//! Orchestrates order creation, payment, status changes and receipts on top
//! of the pure rules in `jati-core` and the repositories in `jati-db`.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Workflow                                   │
//! │                                                                         │
//! │  create_order                                                           │
//! │    validate ─► resolve customer ─► resolve every product ─► price       │
//! │              └──────────── nothing written yet ────────────┘            │
//! │    ─► create_with_items (one transaction, ORD-<n>)                      │
//! │                                                                         │
//! │  process_payment                                                        │
//! │    open_ledger (locks order) ─► sum completed ─► assess_payment         │
//! │    ─► record ─► [mark_paid] ─► commit                                   │
//! │    any error ─► ledger dropped ─► rollback                              │
//! │                                                                         │
//! │  generate_receipt                                                       │
//! │    get order ─► paid? ─► existing receipt? ─► issue (RCP-<n>)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use jati_core::pricing::{price_order, PriceLine};
use jati_core::settlement::assess_payment;
use jati_core::validation::{validate_id, validate_new_order};
use jati_core::{
    CoreError, ErrorKind, Money, NewOrder, NewPayment, Order, OrderStatus, Payment,
    PaymentStatus, Receipt, ValidationError,
};
use jati_db::{Database, DbError};

use super::lookup::{CustomerLookup, ProductLookup};

// =============================================================================
// Errors
// =============================================================================

/// Failure of a workflow operation.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Business rule or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure (or a NotFound surfaced by a zero-row update).
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        OrderError::Core(CoreError::Validation(err))
    }
}

impl OrderError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Core(e) => e.kind(),
            OrderError::Db(e) => e.kind(),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Status Policy
// =============================================================================

/// How `update_order_status` treats the requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Any known status may be set from any status.
    #[default]
    Permissive,
    /// Only pending → completed/cancelled (or re-applying the current one).
    Strict,
}

// =============================================================================
// Service
// =============================================================================

/// The order workflow engine.
#[derive(Clone)]
pub struct OrderService {
    db: Database,
    products: Arc<dyn ProductLookup>,
    customers: Arc<dyn CustomerLookup>,
    policy: StatusPolicy,
}

impl OrderService {
    /// Creates a service backed entirely by `db`.
    pub fn new(db: Database) -> Self {
        OrderService {
            products: Arc::new(db.products()),
            customers: Arc::new(db.customers()),
            db,
            policy: StatusPolicy::default(),
        }
    }

    /// Replaces the product and customer lookups.
    pub fn with_lookups(
        mut self,
        products: Arc<dyn ProductLookup>,
        customers: Arc<dyn CustomerLookup>,
    ) -> Self {
        self.products = products;
        self.customers = customers;
        self
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.policy
    }

    // =========================================================================
    // CreateOrder
    // =========================================================================

    /// Validates, prices and persists a new order with its items.
    ///
    /// Every referenced product (and the customer, when given) is resolved
    /// before anything is written. The header and items are then inserted
    /// in a single transaction.
    ///
    /// ## Errors
    /// - `InvalidArgument` for malformed input
    /// - `NotFound` for an unknown customer or product
    /// - `Persistence` if the insert fails (nothing is kept)
    pub async fn create_order(&self, request: NewOrder) -> OrderResult<Order> {
        if let Err(e) = validate_new_order(&request) {
            warn!(error = %e, "Order rejected");
            return Err(e.into());
        }

        if let Some(customer_id) = &request.customer_id {
            self.customers
                .get_customer(customer_id)
                .await?
                .ok_or_else(|| CoreError::CustomerNotFound(customer_id.clone()))?;
        }

        let mut lines = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let product = self
                .products
                .get_product(&item.product_id)
                .await?
                .ok_or_else(|| CoreError::ProductNotFound(item.product_id.clone()))?;

            lines.push(PriceLine::new(
                product.id.clone(),
                product.price(),
                item.quantity,
                Money::from_cents(item.discount_cents),
            ));
        }

        let priced = price_order(
            &lines,
            Money::from_cents(request.tax_cents),
            Money::from_cents(request.discount_cents),
        );
        let draft = priced.into_draft(request.customer_id, request.notes);

        let order = self.db.orders().create_with_items(&draft).await?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            items = order.items.len(),
            total = %order.total(),
            "Order created"
        );

        Ok(order)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets an order with its items.
    pub async fn get_order(&self, order_id: &str) -> OrderResult<Order> {
        validate_id("order_id", order_id)?;

        let order = self
            .db
            .orders()
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        Ok(order)
    }

    /// Gets a customer's orders, newest first.
    ///
    /// The customer is not looked up: an unknown id simply has no orders.
    pub async fn get_orders_by_customer(&self, customer_id: &str) -> OrderResult<Vec<Order>> {
        validate_id("customer_id", customer_id)?;
        Ok(self.db.orders().list_by_customer(customer_id).await?)
    }

    /// Lists an order's payments, oldest first.
    pub async fn list_payments(&self, order_id: &str) -> OrderResult<Vec<Payment>> {
        self.get_order(order_id).await?;
        Ok(self.db.payments().list_by_order(order_id).await?)
    }

    // =========================================================================
    // UpdateOrderStatus
    // =========================================================================

    /// Sets the fulfilment status of an order and returns the updated order.
    ///
    /// ## Errors
    /// - `InvalidArgument` if `status` is not a known status
    /// - `NotFound` if the order does not exist
    /// - `InvalidState` under [`StatusPolicy::Strict`] when the transition is
    ///   not allowed, or when the status changed underneath us
    pub async fn update_order_status(&self, order_id: &str, status: &str) -> OrderResult<Order> {
        validate_id("order_id", order_id)?;
        let next: OrderStatus = status.parse()?;

        match self.policy {
            StatusPolicy::Permissive => {
                match self.db.orders().update_status(order_id, next).await {
                    Ok(()) => {}
                    Err(DbError::NotFound { .. }) => {
                        return Err(CoreError::OrderNotFound(order_id.to_string()).into())
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            StatusPolicy::Strict => {
                let current = self.get_order(order_id).await?;
                let rejected = || CoreError::InvalidStatusTransition {
                    order_id: order_id.to_string(),
                    from: current.status.to_string(),
                    to: next.to_string(),
                };

                if !current.status.can_transition_to(next) {
                    warn!(order_id = %order_id, from = %current.status, to = %next, "Status change rejected");
                    return Err(rejected().into());
                }

                let applied = self
                    .db
                    .orders()
                    .update_status_from(order_id, current.status, next)
                    .await?;
                if !applied {
                    warn!(order_id = %order_id, from = %current.status, to = %next, "Status changed concurrently");
                    return Err(rejected().into());
                }
            }
        }

        info!(order_id = %order_id, status = %next, "Order status updated");

        self.get_order(order_id).await
    }

    // =========================================================================
    // ProcessPayment
    // =========================================================================

    /// Applies a payment to an order.
    ///
    /// Runs under the order's payment ledger, so concurrent payments for the
    /// same order are checked one after another against the committed sum.
    ///
    /// ## Errors
    /// - `NotFound` if the order does not exist
    /// - `InvalidArgument` if the amount is not positive, or if it would push
    ///   completed payments past the order total
    pub async fn process_payment(&self, order_id: &str, request: NewPayment) -> OrderResult<Payment> {
        validate_id("order_id", order_id)?;

        let mut ledger = match self.db.payments().open_ledger(order_id).await {
            Ok(ledger) => ledger,
            Err(DbError::NotFound { .. }) => {
                return Err(CoreError::OrderNotFound(order_id.to_string()).into())
            }
            Err(e) => return Err(e.into()),
        };

        let total = ledger.order().total();
        let already_paid = ledger.total_completed().await?;
        let amount = Money::from_cents(request.amount_cents);

        let settlement = match assess_payment(total, already_paid, amount) {
            Ok(settlement) => settlement,
            Err(e) => {
                warn!(order_id = %order_id, amount = %amount, error = %e, "Payment rejected");
                return Err(e.into());
            }
        };

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            amount_cents: amount.cents(),
            method: request.method,
            reference: request.reference,
            status: PaymentStatus::Completed,
            created_at: now,
            updated_at: now,
        };

        ledger.record_payment(&payment).await?;
        if settlement.settles_order {
            ledger.mark_paid().await?;
        }
        let order = ledger.commit().await?;

        info!(
            order_id = %order_id,
            payment_id = %payment.id,
            amount = %amount,
            remaining = %settlement.remaining,
            "Payment recorded"
        );
        if settlement.settles_order {
            info!(order_id = %order_id, order_number = %order.order_number, "Order paid");
        }

        Ok(payment)
    }

    // =========================================================================
    // GenerateReceipt
    // =========================================================================

    /// Returns the order's receipt, issuing it on first request.
    ///
    /// ## Errors
    /// - `NotFound` if the order does not exist
    /// - `InvalidState` if the order is not paid
    pub async fn generate_receipt(&self, order_id: &str) -> OrderResult<Receipt> {
        let order = self.get_order(order_id).await?;

        if !order.is_paid() {
            warn!(order_id = %order_id, payment_status = %order.payment_status, "Receipt refused");
            return Err(CoreError::UnpaidOrder {
                order_id: order_id.to_string(),
            }
            .into());
        }

        let receipts = self.db.receipts();
        if let Some(existing) = receipts.get_by_order_id(order_id).await? {
            return Ok(existing);
        }

        Ok(receipts.issue(&order).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let not_found: OrderError = CoreError::OrderNotFound("x".into()).into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let invalid: OrderError = ValidationError::Required {
            field: "items".into(),
        }
        .into();
        assert_eq!(invalid.kind(), ErrorKind::InvalidArgument);

        let unpaid: OrderError = CoreError::UnpaidOrder {
            order_id: "x".into(),
        }
        .into();
        assert_eq!(unpaid.kind(), ErrorKind::InvalidState);

        let storage: OrderError = DbError::QueryFailed("disk I/O error".into()).into();
        assert_eq!(storage.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn test_default_policy_is_permissive() {
        assert_eq!(StatusPolicy::default(), StatusPolicy::Permissive);
    }
}
