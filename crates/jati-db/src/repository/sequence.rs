//! # Number Sequences
//!
//! Monotonic counters behind `ORD-<n>` and `RCP-<n>`.
//!
//! The counter is bumped inside the caller's transaction, so the value is
//! consumed only if that transaction commits. The `UPDATE` also takes the
//! SQLite write lock, which makes concurrent callers queue rather than read
//! the same value.

use sqlx::SqliteConnection;

use crate::error::{DbError, DbResult};

/// Sequence backing order numbers.
pub const ORDER_SEQUENCE: &str = "order";

/// Sequence backing receipt numbers.
pub const RECEIPT_SEQUENCE: &str = "receipt";

/// Increments the named sequence and returns the new value.
pub async fn next_value(conn: &mut SqliteConnection, name: &str) -> DbResult<i64> {
    let value: Option<i64> = sqlx::query_scalar(
        "UPDATE number_sequences SET last_value = last_value + 1 WHERE name = ?1 RETURNING last_value",
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;

    value.ok_or_else(|| DbError::MissingSequence(name.to_string()))
}
