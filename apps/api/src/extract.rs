//! Custom extractors.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// `Json<T>` whose rejection is the API error envelope.
///
/// Any body that is not valid JSON for `T` (wrong content type, syntax
/// error, missing field, unknown enum value) becomes
/// `400 { "error": "Invalid request body", "code": "INVALID_ARGUMENT" }`.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "Request body rejected");
                Err(ApiError::bad_request("Invalid request body"))
            }
        }
    }
}
