//! # Customer Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use jati_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, address, created_at, updated_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    ///
    /// ## Errors
    /// - `UniqueViolation` if the email is already registered
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, address, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();
        let now = Utc::now();

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: "Sari".to_string(),
            email: Some("sari@example.com".to_string()),
            phone: None,
            address: Some("Jl. Merdeka 1".to_string()),
            created_at: now,
            updated_at: now,
        };
        repo.insert(&customer).await.unwrap();

        let found = repo.get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Sari");
        assert_eq!(found.address.as_deref(), Some("Jl. Merdeka 1"));

        let dup = Customer {
            id: Uuid::new_v4().to_string(),
            ..customer
        };
        let err = repo.insert(&dup).await.unwrap_err();
        assert!(err.is_unique_violation_on("customers.email"));
    }
}
