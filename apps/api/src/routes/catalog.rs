//! Product and customer registration.
//!
//! These are thin wrappers over the repositories; the order workflow only
//! reads them through its lookups.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use jati_core::validation::{validate_id, validate_name, validate_non_negative};
use jati_core::{Customer, Product};

use crate::dto::{
    ApiResponse, CreateCustomerRequest, CreateProductRequest, CustomerResponse, ProductResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::AppState;

/// Trims and drops empty optional text.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Products
// =============================================================================

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ProductResponse>>)> {
    validate_name("name", &req.name)?;
    validate_non_negative("price_cents", req.price_cents)?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        description: non_empty(req.description),
        sku: non_empty(req.sku),
        price_cents: req.price_cents,
        created_at: now,
        updated_at: now,
    };

    state.db.products().insert(&product).await?;
    info!(product_id = %product.id, price = %product.price(), "Product registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Product created successfully", product.into())),
    ))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ProductResponse>>> {
    validate_id("product_id", &id)?;

    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {id}")))?;

    Ok(Json(ApiResponse::ok("Product retrieved successfully", product.into())))
}

// =============================================================================
// Customers
// =============================================================================

/// POST /api/v1/customers
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateCustomerRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CustomerResponse>>)> {
    validate_name("name", &req.name)?;

    let now = Utc::now();
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        email: non_empty(req.email),
        phone: non_empty(req.phone),
        address: non_empty(req.address),
        created_at: now,
        updated_at: now,
    };

    state.db.customers().insert(&customer).await?;
    info!(customer_id = %customer.id, "Customer registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Customer created successfully", customer.into())),
    ))
}

/// GET /api/v1/customers/{id}
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<CustomerResponse>>> {
    validate_id("customer_id", &id)?;

    let customer = state
        .db
        .customers()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer not found: {id}")))?;

    Ok(Json(ApiResponse::ok("Customer retrieved successfully", customer.into())))
}
