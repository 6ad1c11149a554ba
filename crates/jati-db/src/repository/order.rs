//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE (one transaction)                                           │
//! │     └── create_with_items()                                            │
//! │         ├── number_sequences 'order' += 1   → ORD-<n>                  │
//! │         ├── INSERT orders       (pending / pending)                    │
//! │         └── INSERT order_items  × n                                    │
//! │         Any failure → ROLLBACK: no header, no items, number unused     │
//! │                                                                         │
//! │  2. PAY (see payment.rs, PaymentLedger)                                │
//! │     └── payment_status pending → paid                                  │
//! │                                                                         │
//! │  3. FULFIL                                                             │
//! │     └── update_status() / update_status_from()                         │
//! │         pending → completed | cancelled                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::sequence::{self, ORDER_SEQUENCE};
use jati_core::{
    format_order_number, Order, OrderDraft, OrderItem, OrderPaymentStatus, OrderStatus,
};

const SELECT_ORDER: &str = r#"
    SELECT
        id, order_number, customer_id, status,
        subtotal_cents, tax_cents, discount_cents, total_cents,
        payment_status, notes, created_at, updated_at
    FROM orders
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Persists a priced order and all of its items atomically.
    ///
    /// ## Returns
    /// The stored order with its assigned id, `ORD-<n>` number, timestamps
    /// and items (in request order).
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` if a product or customer vanished after lookup
    /// - any other storage failure
    ///
    /// Nothing is visible to other connections unless every row was written.
    pub async fn create_with_items(&self, draft: &OrderDraft) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;

        let number = sequence::next_value(&mut tx, ORDER_SEQUENCE).await?;
        let now = Utc::now();

        let mut order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: format_order_number(number),
            customer_id: draft.customer_id.clone(),
            status: OrderStatus::Pending,
            subtotal_cents: draft.subtotal_cents,
            tax_cents: draft.tax_cents,
            discount_cents: draft.discount_cents,
            total_cents: draft.total_cents,
            payment_status: OrderPaymentStatus::Pending,
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
            items: Vec::with_capacity(draft.items.len()),
        };

        debug!(
            id = %order.id,
            order_number = %order.order_number,
            items = draft.items.len(),
            "Inserting order"
        );

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, customer_id, status,
                subtotal_cents, tax_cents, discount_cents, total_cents,
                payment_status, notes, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11, ?12
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(&order.customer_id)
        .bind(order.status)
        .bind(order.subtotal_cents)
        .bind(order.tax_cents)
        .bind(order.discount_cents)
        .bind(order.total_cents)
        .bind(order.payment_status)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, line) in draft.items.iter().enumerate() {
            let item = OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order.id.clone(),
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
                discount_cents: line.discount_cents,
                total_price_cents: line.total_price_cents,
                created_at: now,
            };

            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, position, quantity,
                    unit_price_cents, discount_cents, total_price_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(position as i64)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.discount_cents)
            .bind(item.total_price_cents)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;

            order.items.push(item);
        }

        tx.commit().await?;

        Ok(order)
    }

    /// Gets an order with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match order {
            Some(mut order) => {
                order.items = self.get_items(&order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Gets the items of an order in the order they were requested.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT
                id, order_id, product_id, quantity,
                unit_price_cents, discount_cents, total_price_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets all orders of a customer, newest first, with their items.
    ///
    /// Returns an empty list for unknown customers.
    pub async fn list_by_customer(&self, customer_id: &str) -> DbResult<Vec<Order>> {
        let mut orders = sqlx::query_as::<_, Order>(&format!(
            "{SELECT_ORDER} WHERE customer_id = ?1 ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        if orders.is_empty() {
            return Ok(orders);
        }

        // One query for every item of every order, grouped in memory.
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT
                oi.id, oi.order_id, oi.product_id, oi.quantity,
                oi.unit_price_cents, oi.discount_cents, oi.total_price_cents, oi.created_at
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE o.customer_id = ?1
            ORDER BY oi.order_id, oi.position
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id.clone()).or_default().push(item);
        }
        for order in &mut orders {
            order.items = by_order.remove(&order.id).unwrap_or_default();
        }

        Ok(orders)
    }

    /// Sets the status unconditionally.
    ///
    /// ## Errors
    /// - `NotFound` if no order has this id
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> DbResult<()> {
        debug!(id = %id, status = %status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Sets the status only if it is still `from` (compare-and-set).
    ///
    /// Returns `false` when the order exists but its status changed since
    /// it was read, or when the order does not exist.
    pub async fn update_status_from(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> DbResult<bool> {
        debug!(id = %id, from = %from, to = %to, "Updating order status (guarded)");

        let result = sqlx::query(
            "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
        )
        .bind(to)
        .bind(Utc::now())
        .bind(id)
        .bind(from)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Sets the payment status.
    ///
    /// ## Errors
    /// - `NotFound` if no order has this id
    pub async fn update_payment_status(&self, id: &str, status: OrderPaymentStatus) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        set_payment_status(&mut conn, id, status).await
    }
}

/// Writes `payment_status` on an existing connection or transaction.
pub(crate) async fn set_payment_status(
    conn: &mut SqliteConnection,
    id: &str,
    status: OrderPaymentStatus,
) -> DbResult<()> {
    debug!(id = %id, payment_status = %status, "Updating order payment status");

    let result = sqlx::query("UPDATE orders SET payment_status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Order", id));
    }

    Ok(())
}

/// Reads an order header (without items) on an existing connection.
pub(crate) async fn fetch_header(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_customer, seed_product};
    use crate::{Database, DbConfig};
    use jati_core::OrderItemDraft;

    fn draft(customer_id: Option<String>, product_ids: &[&str]) -> OrderDraft {
        let items: Vec<OrderItemDraft> = product_ids
            .iter()
            .map(|pid| OrderItemDraft {
                product_id: pid.to_string(),
                quantity: 2,
                unit_price_cents: 10_000,
                discount_cents: 1_000,
                total_price_cents: 19_000,
            })
            .collect();
        let subtotal = 19_000 * items.len() as i64;
        OrderDraft {
            customer_id,
            subtotal_cents: subtotal,
            tax_cents: 1_500,
            discount_cents: 500,
            total_cents: subtotal + 1_000,
            notes: Some("table 4".to_string()),
            items,
        }
    }

    async fn count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = seed_product(&db, 10_000).await;
        let b = seed_product(&db, 10_000).await;

        let created = db.orders().create_with_items(&draft(None, &[a.as_str(), b.as_str()])).await.unwrap();
        assert_eq!(created.order_number, "ORD-1000");
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.payment_status, OrderPaymentStatus::Pending);
        assert_eq!(created.items.len(), 2);

        let loaded = db.orders().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded.order_number, created.order_number);
        assert_eq!(loaded.total_cents, created.total_cents);
        assert_eq!(loaded.notes.as_deref(), Some("table 4"));
        let products: Vec<_> = loaded.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(products, vec![a.as_str(), b.as_str()]);

        let second = db.orders().create_with_items(&draft(None, &[a.as_str()])).await.unwrap();
        assert_eq!(second.order_number, "ORD-1001");
    }

    #[tokio::test]
    async fn test_failed_item_insert_rolls_back_everything() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let good = seed_product(&db, 10_000).await;
        let missing = Uuid::new_v4().to_string();

        let err = db
            .orders()
            .create_with_items(&draft(None, &[good.as_str(), missing.as_str()]))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        assert_eq!(count(&db, "orders").await, 0);
        assert_eq!(count(&db, "order_items").await, 0);

        // The sequence value was not consumed
        let next = db.orders().create_with_items(&draft(None, &[good.as_str()])).await.unwrap();
        assert_eq!(next.order_number, "ORD-1000");
    }

    #[tokio::test]
    async fn test_list_by_customer_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 10_000).await;
        let customer = seed_customer(&db).await;
        let other = seed_customer(&db).await;

        let first = db
            .orders()
            .create_with_items(&draft(Some(customer.clone()), &[product.as_str()]))
            .await
            .unwrap();
        let second = db
            .orders()
            .create_with_items(&draft(Some(customer.clone()), &[product.as_str(), product.as_str()]))
            .await
            .unwrap();
        db.orders()
            .create_with_items(&draft(Some(other), &[product.as_str()]))
            .await
            .unwrap();

        let orders = db.orders().list_by_customer(&customer).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[1].items.len(), 1);

        let none = db.orders().list_by_customer(&Uuid::new_v4().to_string()).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_status_updates() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 10_000).await;
        let order = db.orders().create_with_items(&draft(None, &[product.as_str()])).await.unwrap();
        let repo = db.orders();

        repo.update_status(&order.id, OrderStatus::Completed).await.unwrap();
        let loaded = repo.get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Completed);
        assert!(loaded.updated_at >= order.updated_at);

        // Compare-and-set only applies from the expected state
        assert!(!repo
            .update_status_from(&order.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await
            .unwrap());
        assert!(repo
            .update_status_from(&order.id, OrderStatus::Completed, OrderStatus::Cancelled)
            .await
            .unwrap());

        repo.update_payment_status(&order.id, OrderPaymentStatus::Paid).await.unwrap();
        assert!(repo.get_by_id(&order.id).await.unwrap().unwrap().is_paid());

        let missing = Uuid::new_v4().to_string();
        assert!(matches!(
            repo.update_status(&missing, OrderStatus::Completed).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update_payment_status(&missing, OrderPaymentStatus::Paid).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
