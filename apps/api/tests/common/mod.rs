//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::Utc;
use jati_core::{Customer, NewOrder, NewOrderItem, Product};
use jati_db::{Database, DbConfig};
use uuid::Uuid;

pub async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

pub async fn add_product(db: &Database, price_cents: i64) -> Product {
    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: "Sate Ayam".to_string(),
        description: None,
        sku: None,
        price_cents,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await.unwrap();
    product
}

pub async fn add_customer(db: &Database) -> Customer {
    let now = Utc::now();
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: "Dewi".to_string(),
        email: None,
        phone: None,
        address: None,
        created_at: now,
        updated_at: now,
    };
    db.customers().insert(&customer).await.unwrap();
    customer
}

pub fn item(product_id: &str, quantity: i64, discount_cents: i64) -> NewOrderItem {
    NewOrderItem {
        product_id: product_id.to_string(),
        quantity,
        discount_cents,
    }
}

/// 100.00 × 2 with 10.00 off the line, 15.00 tax, 5.00 off the order.
/// Subtotal 190.00, total 200.00.
pub fn reference_order(product_id: &str, customer_id: Option<&str>) -> NewOrder {
    NewOrder {
        customer_id: customer_id.map(str::to_string),
        items: vec![item(product_id, 2, 1_000)],
        tax_cents: 1_500,
        discount_cents: 500,
        notes: None,
    }
}

pub async fn count_rows(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .unwrap()
}
