//! Collaborator lookups used by the order workflow.
//!
//! The engine only needs to resolve products and customers by id. These
//! traits let tests swap in failing or counting lookups without a database.

use async_trait::async_trait;
use jati_core::{Customer, Product};
use jati_db::{CustomerRepository, DbResult, ProductRepository};

/// Resolves products for order items.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn get_product(&self, id: &str) -> DbResult<Option<Product>>;
}

/// Resolves the optional customer of an order.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn get_customer(&self, id: &str) -> DbResult<Option<Customer>>;
}

#[async_trait]
impl ProductLookup for ProductRepository {
    async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        self.get_by_id(id).await
    }
}

#[async_trait]
impl CustomerLookup for CustomerRepository {
    async fn get_customer(&self, id: &str) -> DbResult<Option<Customer>> {
        self.get_by_id(id).await
    }
}
