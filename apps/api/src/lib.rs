//! # Jati API
//!
//! HTTP server for the order fulfillment workflow.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Jati API                                      │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────────────┐  ┌───────────────────┐ │
//! │  │  routes        │  │  OrderService          │  │  jati-db          │ │
//! │  │                │  │                        │  │                   │ │
//! │  │ • orders       │─►│ • create_order         │─►│ • OrderRepository │ │
//! │  │ • payments     │  │ • update_order_status  │  │ • PaymentLedger   │ │
//! │  │ • receipt      │  │ • process_payment      │  │ • ReceiptRepo     │ │
//! │  │ • catalog      │  │ • generate_receipt     │  │                   │ │
//! │  │ • health       │  │ • get_orders_by_cust.  │  │  SQLite (WAL)     │ │
//! │  └────────────────┘  └────────────────────────┘  └───────────────────┘ │
//! │          │                      │                                       │
//! │          ▼                      ▼                                       │
//! │     ApiError ◄────────────  OrderError (kind)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (a `.env` file is read first if present):
//! - `HOST` / `PORT` - Listen address (default: 0.0.0.0:8080)
//! - `DATABASE_PATH` - SQLite file (default: ./jati.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_BUSY_TIMEOUT_SECS` - Writer lock wait (default: 5)
//! - `STRICT_STATUS_TRANSITIONS` - Enforce the status table (default: false)
//! - `ENVIRONMENT` - Deployment label (default: development)
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;

use jati_db::Database;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::build_router;
pub use services::{OrderError, OrderService, StatusPolicy};

/// Shared application state.
pub struct AppState {
    pub service: OrderService,
    pub db: Database,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the order service to `db` using the configured status policy.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let service = OrderService::new(db.clone()).with_status_policy(config.status_policy());
        AppState {
            service,
            db,
            config,
        }
    }
}
