use crate::error::BlogError;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String, BlogError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            authorized: true,
            user_id,
            iat: now,
            exp: now.saturating_add(ttl),
        };
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, BlogError> {
        Ok(encode(&Header::default(), claims, &self.encoding_key)?)
    }

    /// Check signature and expiry, returning the claims of a usable token.
    pub fn verify(&self, token: &str) -> Result<Claims, BlogError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        if !data.claims.authorized {
            return Err(BlogError::Unauthorized);
        }
        Ok(data.claims)
    }
}
