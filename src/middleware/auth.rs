use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use tracing::debug;

use crate::error::BlogError;
use crate::router::BlogState;

/// Find the access token of a request.
/// Accepts either:
/// - Query string: `?token=...`
/// - Header: `Authorization: Bearer <token>`
pub async fn extract_token(parts: &mut Parts, state: &BlogState) -> Option<String> {
    if let Some(token) = parts.uri.query().and_then(query_token) {
        return Some(token);
    }

    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(auth)| auth.token().to_string())
}

fn query_token(qs: &str) -> Option<String> {
    url::form_urlencoded::parse(qs.as_bytes())
        .find(|(k, v)| k == "token" && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// The user an authenticated request acts as.
///
/// Rejects with 401 when the token is missing, malformed, expired, or names
/// a user that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

impl FromRequestParts<BlogState> for AuthUser {
    type Rejection = BlogError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &BlogState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(parts, state).await else {
            return Err(BlogError::Unauthorized);
        };

        let claims = state.tokens.verify(&token).map_err(|e| {
            debug!(error = %e, "rejected access token");
            BlogError::Unauthorized
        })?;

        if !state.storage.user_exists(claims.user_id).await? {
            debug!(user_id = claims.user_id, "token names a deleted user");
            return Err(BlogError::Unauthorized);
        }

        Ok(Self(claims.user_id))
    }
}
