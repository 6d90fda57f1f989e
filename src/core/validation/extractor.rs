//! Axum extractor for validated request bodies
//!
//! `ValidatedJson<T>` deserializes the body and runs `T::validate()`.
//! Malformed JSON and missing fields are both rejected with a 400 carrying
//! the standard error body.

use crate::core::error::{BiztimeError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a JSON payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(state): State<AppState>,
///     ValidatedJson(payload): ValidatedJson<CreateInvoice>,
/// ) -> BiztimeResult<(StatusCode, Json<Value>)> {
///     // every `#[validate(required)]` field of payload is Some
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = BiztimeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<T> = Json::from_request(req, state).await.map_err(|e| {
            BiztimeError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        payload.validate()?;

        Ok(ValidatedJson(payload))
    }
}
