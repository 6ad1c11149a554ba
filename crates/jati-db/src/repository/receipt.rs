//! # Receipt Repository
//!
//! At most one receipt exists per order. `receipts.order_id` is UNIQUE, so
//! two concurrent `issue` calls cannot both insert: the loser hits the
//! constraint and returns the winner's receipt instead.
//!
//! ```text
//!   issue(order)
//!     ├── BEGIN
//!     ├── number_sequences 'receipt' += 1   → RCP-<n>
//!     ├── INSERT receipts ──── ok ─────────► COMMIT, return new receipt
//!     │                   └─── UNIQUE(order_id) ─► ROLLBACK (number unused)
//!     │                                            └─► return existing receipt
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::sequence::{self, RECEIPT_SEQUENCE};
use jati_core::{format_receipt_number, Order, Receipt};

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Gets the receipt of an order, if one was issued.
    pub async fn get_by_order_id(&self, order_id: &str) -> DbResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, order_id, receipt_number, total_cents, tax_cents, created_at
            FROM receipts
            WHERE order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    /// Issues a receipt for an order, snapshotting its total and tax.
    ///
    /// Returns the already-issued receipt if another caller got there first.
    /// Payment state is not checked here.
    pub async fn issue(&self, order: &Order) -> DbResult<Receipt> {
        match self.insert_next(order).await {
            Ok(receipt) => {
                info!(
                    order_id = %order.id,
                    receipt_number = %receipt.receipt_number,
                    "Receipt issued"
                );
                Ok(receipt)
            }
            Err(e) if e.is_unique_violation_on("receipts.order_id") => {
                debug!(order_id = %order.id, "Receipt already issued concurrently");
                self.get_by_order_id(&order.id)
                    .await?
                    .ok_or_else(|| DbError::not_found("Receipt", &order.id))
            }
            Err(e) => Err(e),
        }
    }

    async fn insert_next(&self, order: &Order) -> DbResult<Receipt> {
        let mut tx = self.pool.begin().await?;

        let number = sequence::next_value(&mut tx, RECEIPT_SEQUENCE).await?;
        let receipt = Receipt {
            id: Uuid::new_v4().to_string(),
            order_id: order.id.clone(),
            receipt_number: format_receipt_number(number),
            total_cents: order.total_cents,
            tax_cents: order.tax_cents,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO receipts (id, order_id, receipt_number, total_cents, tax_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&receipt.id)
        .bind(&receipt.order_id)
        .bind(&receipt.receipt_number)
        .bind(receipt.total_cents)
        .bind(receipt.tax_cents)
        .bind(receipt.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_order, seed_product};
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_issue_then_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 10_000).await;
        let order = seed_order(&db, &product).await;
        let repo = db.receipts();

        assert!(repo.get_by_order_id(&order.id).await.unwrap().is_none());

        let receipt = repo.issue(&order).await.unwrap();
        assert_eq!(receipt.receipt_number, "RCP-1000");
        assert_eq!(receipt.total_cents, order.total_cents);
        assert_eq!(receipt.tax_cents, order.tax_cents);

        let found = repo.get_by_order_id(&order.id).await.unwrap().unwrap();
        assert_eq!(found.id, receipt.id);
    }

    #[tokio::test]
    async fn test_second_issue_returns_existing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 10_000).await;
        let order = seed_order(&db, &product).await;
        let other = seed_order(&db, &product).await;
        let repo = db.receipts();

        let first = repo.issue(&order).await.unwrap();
        let again = repo.issue(&order).await.unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.receipt_number, first.receipt_number);

        // The rejected attempt did not burn a number
        let next = repo.issue(&other).await.unwrap();
        assert_eq!(next.receipt_number, "RCP-1001");
    }
}
