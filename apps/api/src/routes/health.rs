//! Health check endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::dto::{ApiResponse, HealthResponse};
use crate::AppState;

/// GET /health
///
/// 200 when the database answers, 503 otherwise.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database = state.db.health_check().await;
    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = ApiResponse {
        success: database,
        message: format!("Service is {label}"),
        data: HealthResponse {
            status: label,
            database,
            environment: state.config.environment.clone(),
            version: env!("CARGO_PKG_VERSION"),
        },
    };

    (status, Json(body))
}
