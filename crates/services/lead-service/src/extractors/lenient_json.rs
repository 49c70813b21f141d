//! Lenient JSON body extractor.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use common::AppError;

/// JSON object extractor for form submissions.
///
/// Unlike `axum::Json` it does not require a `Content-Type` header, treats
/// an empty body as `{}`, and reports every decoding failure as
/// [`AppError::MalformedBody`] so it is answered with a JSON error body.
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::malformed_body(e.body_text()))?;

        decode(&bytes).map(LenientJson)
    }
}

/// Decode a request body that must hold a JSON object.
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let value: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(bytes).map_err(|e| AppError::malformed_body(e.to_string()))?
    };

    if !value.is_object() {
        return Err(AppError::malformed_body("request body must be a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| AppError::malformed_body(e.to_string()))
}
