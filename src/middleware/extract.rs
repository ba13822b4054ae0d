use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::BlogError;

/// JSON request body whose rejections render as `{"error": ...}` with status 422.
///
/// The `Content-Type` header is not consulted; any body that parses is accepted.
pub struct JsonBody<T>(pub T);

impl<T: DeserializeOwned> JsonBody<T> {
    /// Decode an already buffered body, for handlers that must run other checks first.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlogError> {
        match Json::<T>::from_bytes(bytes) {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(BlogError::InvalidBody(rejection.body_text())),
        }
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BlogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| BlogError::InvalidBody(rejection.body_text()))?;
        Self::from_bytes(&bytes)
    }
}

/// Numeric `{id}` path segment; anything else is a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = BlogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| BlogError::InvalidId)?;
        parse_id(&raw).map(ResourceId).ok_or(BlogError::InvalidId)
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<u64>().ok().and_then(|v| i64::try_from(v).ok())
}
