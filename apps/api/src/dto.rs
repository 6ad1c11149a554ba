//! Request and response bodies.
//!
//! Wire format is camelCase JSON. Amounts are integer cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jati_core::{
    Customer, NewOrder, NewOrderItem, NewPayment, Order, OrderItem, OrderPaymentStatus,
    OrderStatus, Payment, PaymentMethod, PaymentStatus, Product, Receipt,
};

// =============================================================================
// Envelope
// =============================================================================

/// Success envelope: `{ "success": true, "message": "...", "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price_cents: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub discount_cents: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: Option<String>,
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub tax_cents: i64,
    #[serde(default)]
    pub discount_cents: i64,
    pub notes: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        NewOrder {
            customer_id: req.customer_id,
            items: req
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    discount_cents: item.discount_cents,
                })
                .collect(),
            tax_cents: req.tax_cents,
            discount_cents: req.discount_cents,
            notes: req.notes,
        }
    }
}

/// Status is taken as free text so unknown values reach the engine's
/// validation instead of failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub reference: Option<String>,
}

impl From<CreatePaymentRequest> for NewPayment {
    fn from(req: CreatePaymentRequest) -> Self {
        NewPayment {
            amount_cents: req.amount_cents,
            method: req.payment_method,
            reference: req.reference,
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            sku: p.sku,
            price_cents: p.price_cents,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        CustomerResponse {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub discount_cents: i64,
    pub total_price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            discount_cents: item.discount_cents,
            total_price_cents: item.total_price_cents,
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub order_number: String,
    pub customer_id: Option<String>,
    pub status: OrderStatus,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_status: OrderPaymentStatus,
    pub notes: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        OrderResponse {
            id: o.id,
            order_number: o.order_number,
            customer_id: o.customer_id,
            status: o.status,
            subtotal_cents: o.subtotal_cents,
            tax_cents: o.tax_cents,
            discount_cents: o.discount_cents,
            total_cents: o.total_cents,
            payment_status: o.payment_status,
            notes: o.notes,
            items: o.items.into_iter().map(Into::into).collect(),
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub order_id: String,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub reference: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        PaymentResponse {
            id: p.id,
            order_id: p.order_id,
            amount_cents: p.amount_cents,
            payment_method: p.method,
            reference: p.reference,
            status: p.status,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub id: String,
    pub order_id: String,
    pub receipt_number: String,
    pub total_cents: i64,
    pub tax_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Receipt> for ReceiptResponse {
    fn from(r: Receipt) -> Self {
        ReceiptResponse {
            id: r.id,
            order_id: r.order_id,
            receipt_number: r.receipt_number,
            total_cents: r.total_cents,
            tax_cents: r.tax_cents,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub environment: String,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_defaults() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"items":[{"productId":"550e8400-e29b-41d4-a716-446655440000","quantity":2}]}"#,
        )
        .unwrap();
        let order = NewOrder::from(req);
        assert_eq!(order.customer_id, None);
        assert_eq!(order.tax_cents, 0);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].discount_cents, 0);
    }

    #[test]
    fn test_payment_method_wire_names() {
        let req: CreatePaymentRequest = serde_json::from_str(
            r#"{"amountCents":500,"paymentMethod":"digital_wallet","reference":"QR-1"}"#,
        )
        .unwrap();
        assert_eq!(req.payment_method, PaymentMethod::DigitalWallet);

        let bad = serde_json::from_str::<CreatePaymentRequest>(
            r#"{"amountCents":500,"paymentMethod":"cheque"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::ok("done", 1)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "done");
        assert_eq!(json["data"], 1);
    }
}
