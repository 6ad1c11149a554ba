//! # jati-db: Database Layer for Jati POS
//!
//! This crate provides database access for the Jati order service.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Jati POS Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /api/v1/orders/{id}/payments)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderService::process_payment                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     jati-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ OrderRepo     │    │ 001_initial  │  │   │
//! │  │   │ SqlitePool    │◄───│ PaymentRepo   │    │   _schema    │  │   │
//! │  │   │ WAL, FKs,     │    │ ReceiptRepo   │    │              │  │   │
//! │  │   │ busy_timeout  │    │ Product/Cust. │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (DATABASE_PATH)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (order, payment, receipt, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jati_db::{Database, DbConfig};
//!
//! // Create database (migrations run on connect)
//! let db = Database::new(DbConfig::new("path/to/jati.db")).await?;
//!
//! // Serialize a payment against one order
//! let mut ledger = db.payments().open_ledger(&order_id).await?;
//! let paid = ledger.total_completed().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::payment::{PaymentLedger, PaymentRepository};
pub use repository::product::ProductRepository;
pub use repository::receipt::ReceiptRepository;

// =============================================================================
// Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use jati_core::{Customer, Order, OrderDraft, OrderItemDraft, Product};
    use uuid::Uuid;

    use crate::Database;

    /// Inserts a product and returns its id.
    pub async fn seed_product(db: &Database, price_cents: i64) -> String {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: "Nasi Goreng".to_string(),
            description: None,
            sku: None,
            price_cents,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product.id
    }

    /// Inserts a customer and returns its id.
    pub async fn seed_customer(db: &Database) -> String {
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: "Budi".to_string(),
            email: None,
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        };
        db.customers().insert(&customer).await.unwrap();
        customer.id
    }

    /// Inserts a one-line order for 2 × 100.00, 10.00 off the line,
    /// 15.00 tax and 5.00 off the order: total 200.00.
    pub async fn seed_order(db: &Database, product_id: &str) -> Order {
        let draft = OrderDraft {
            customer_id: None,
            subtotal_cents: 19_000,
            tax_cents: 1_500,
            discount_cents: 500,
            total_cents: 20_000,
            notes: None,
            items: vec![OrderItemDraft {
                product_id: product_id.to_string(),
                quantity: 2,
                unit_price_cents: 10_000,
                discount_cents: 1_000,
                total_price_cents: 19_000,
            }],
        };
        db.orders().create_with_items(&draft).await.unwrap()
    }
}
