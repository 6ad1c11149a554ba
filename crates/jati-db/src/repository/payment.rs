//! # Payment Repository
//!
//! Payment history and the serialized payment ledger.
//!
//! ## Why a Ledger?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two terminals pay 60% of the same order at the same time               │
//! │                                                                         │
//! │  Without serialization:                                                 │
//! │    T1: SUM(paid) = 0     T2: SUM(paid) = 0                              │
//! │    T1: 0 + 60 <= 100 ✓   T2: 0 + 60 <= 100 ✓                            │
//! │    T1: INSERT            T2: INSERT          → 120% collected ✗         │
//! │                                                                         │
//! │  With PaymentLedger:                                                    │
//! │    T1: BEGIN; lock order row                                            │
//! │    T2: BEGIN; lock order row ── waits (busy_timeout) ──┐                │
//! │    T1: SUM = 0; 60 <= 100 ✓; INSERT; COMMIT            │                │
//! │    T2: ◄───────────────────────────────────────────────┘                │
//! │    T2: SUM = 60; 120 > 100 ✗; ROLLBACK       → 60% collected ✓          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is taken by a no-op `UPDATE` on the order row, which acquires
//! SQLite's write lock for the rest of the transaction.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::order::{fetch_header, set_payment_status};
use jati_core::{Money, Order, OrderPaymentStatus, Payment};

const SELECT_PAYMENT: &str = r#"
    SELECT id, order_id, amount_cents, method, reference, status, created_at, updated_at
    FROM payments
"#;

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Opens a ledger on an order, holding the write lock until the ledger
    /// is committed or dropped.
    ///
    /// ## Errors
    /// - `NotFound` if no order has this id
    pub async fn open_ledger(&self, order_id: &str) -> DbResult<PaymentLedger> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query("UPDATE orders SET updated_at = updated_at WHERE id = ?1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        if locked.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        let order = fetch_header(&mut tx, order_id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", order_id))?;

        debug!(order_id = %order_id, "Payment ledger opened");

        Ok(PaymentLedger { tx, order })
    }

    /// Sums the completed payments of an order.
    pub async fn sum_completed(&self, order_id: &str) -> DbResult<Money> {
        let mut conn = self.pool.acquire().await?;
        sum_completed(&mut conn, order_id).await
    }

    /// Lists the payments of an order, oldest first.
    pub async fn list_by_order(&self, order_id: &str) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "{SELECT_PAYMENT} WHERE order_id = ?1 ORDER BY created_at, rowid"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}

async fn sum_completed(conn: &mut sqlx::SqliteConnection, order_id: &str) -> DbResult<Money> {
    let cents: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount_cents), 0)
        FROM payments
        WHERE order_id = ?1 AND status = 'completed'
        "#,
    )
    .bind(order_id)
    .fetch_one(conn)
    .await?;

    Ok(Money::from_cents(cents))
}

// =============================================================================
// Payment Ledger
// =============================================================================

/// An open, exclusive view of one order's payments.
///
/// Dropping the ledger without calling [`commit`](PaymentLedger::commit)
/// rolls back everything recorded through it.
#[derive(Debug)]
pub struct PaymentLedger {
    tx: Transaction<'static, Sqlite>,
    order: Order,
}

impl PaymentLedger {
    /// The order header as read under the lock.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Sum of completed payments, including any recorded through this ledger.
    pub async fn total_completed(&mut self) -> DbResult<Money> {
        sum_completed(&mut self.tx, &self.order.id).await
    }

    /// Records a payment against the locked order.
    pub async fn record_payment(&mut self, payment: &Payment) -> DbResult<()> {
        debug!(
            id = %payment.id,
            order_id = %payment.order_id,
            amount = %payment.amount(),
            method = %payment.method,
            "Recording payment"
        );

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, order_id, amount_cents, method, reference, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.order_id)
        .bind(payment.amount_cents)
        .bind(payment.method)
        .bind(&payment.reference)
        .bind(payment.status)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    /// Marks the order as fully paid.
    pub async fn mark_paid(&mut self) -> DbResult<()> {
        set_payment_status(&mut self.tx, &self.order.id, OrderPaymentStatus::Paid).await?;
        self.order.payment_status = OrderPaymentStatus::Paid;
        self.order.updated_at = Utc::now();
        Ok(())
    }

    /// Commits and releases the lock, returning the order header as written.
    pub async fn commit(self) -> DbResult<Order> {
        self.tx.commit().await?;
        Ok(self.order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
