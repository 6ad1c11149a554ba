//! # Repository Module
//!
//! Database repository implementations for Jati POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  OrderService (apps/api)                                               │
//! │       │                                                                 │
//! │       │  db.orders().create_with_items(&draft)                         │
//! │       ▼                                                                 │
//! │  OrderRepository / PaymentRepository / ReceiptRepository               │
//! │       │                                                                 │
//! │       │  SQL + transaction boundaries                                   │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product lookup and registration
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer lookup and registration
//! - [`OrderRepository`](order::OrderRepository) - Atomic order + items, status updates
//! - [`PaymentRepository`](payment::PaymentRepository) - Payment history and the locked [`PaymentLedger`](payment::PaymentLedger)
//! - [`ReceiptRepository`](receipt::ReceiptRepository) - Get-or-create receipts

pub mod customer;
pub mod order;
pub mod payment;
pub mod product;
pub mod receipt;
pub mod sequence;
