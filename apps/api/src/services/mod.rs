//! Service layer.
//!
//! - [`order_service`] - The order workflow engine
//! - [`lookup`] - Product/customer collaborator traits

pub mod lookup;
pub mod order_service;

pub use lookup::{CustomerLookup, ProductLookup};
pub use order_service::{OrderError, OrderResult, OrderService, StatusPolicy};
