//! HTTP routing.
//!
//! ```text
//! GET  /health
//! POST /api/v1/products              GET /api/v1/products/{id}
//! POST /api/v1/customers             GET /api/v1/customers/{id}
//!                                    GET /api/v1/customers/{id}/orders
//! POST /api/v1/orders                GET /api/v1/orders/{id}
//! PUT  /api/v1/orders/{id}/status
//! POST /api/v1/orders/{id}/payments  GET /api/v1/orders/{id}/payments
//! POST /api/v1/orders/{id}/receipt
//! ```

pub mod catalog;
pub mod health;
pub mod orders;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the application router with tracing and CORS layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/products", post(catalog::create_product))
        .route("/products/{id}", get(catalog::get_product))
        .route("/customers", post(catalog::create_customer))
        .route("/customers/{id}", get(catalog::get_customer))
        .route("/customers/{id}/orders", get(orders::customer_orders))
        .route("/orders", post(orders::create_order))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", put(orders::update_order_status))
        .route(
            "/orders/{id}/payments",
            post(orders::process_payment).get(orders::list_payments),
        )
        .route("/orders/{id}/receipt", post(orders::generate_receipt));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
