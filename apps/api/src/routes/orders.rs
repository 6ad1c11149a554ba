//! Order workflow endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{
    ApiResponse, CreateOrderRequest, CreatePaymentRequest, OrderResponse, PaymentResponse,
    ReceiptResponse, UpdateStatusRequest,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;

/// POST /api/v1/orders
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<OrderResponse>>)> {
    let order = state.service.create_order(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Order created successfully", order.into())),
    ))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<OrderResponse>>> {
    let order = state.service.get_order(&id).await?;
    Ok(Json(ApiResponse::ok("Order retrieved successfully", order.into())))
}

/// PUT /api/v1/orders/{id}/status
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Json<ApiResponse<OrderResponse>>> {
    let order = state.service.update_order_status(&id, &req.status).await?;
    Ok(Json(ApiResponse::ok("Order status updated successfully", order.into())))
}

/// POST /api/v1/orders/{id}/payments
pub async fn process_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PaymentResponse>>)> {
    let payment = state.service.process_payment(&id, req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Payment processed successfully", payment.into())),
    ))
}

/// GET /api/v1/orders/{id}/payments
pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<PaymentResponse>>>> {
    let payments = state.service.list_payments(&id).await?;
    let data: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok("Payments retrieved successfully", data)))
}

/// POST /api/v1/orders/{id}/receipt
pub async fn generate_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ReceiptResponse>>> {
    let receipt = state.service.generate_receipt(&id).await?;
    Ok(Json(ApiResponse::ok("Receipt generated successfully", receipt.into())))
}

/// GET /api/v1/customers/{id}/orders
pub async fn customer_orders(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<OrderResponse>>>> {
    let orders = state.service.get_orders_by_customer(&id).await?;
    let data: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok("Customer orders retrieved successfully", data)))
}
