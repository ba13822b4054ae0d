//! Argon2id password hashing. Hashes are PHC strings carrying their own salt and parameters.

use crate::error::BlogError;
use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

pub fn hash(password: &str) -> Result<String, BlogError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| BlogError::PasswordHash(e.to_string()))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify(password: &str, hash: &str) -> Result<bool, BlogError> {
    let parsed = PasswordHash::new(hash).map_err(|e| BlogError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(BlogError::PasswordHash(e.to_string())),
    }
}

/// Run [`hash`] on the blocking pool so request workers are not stalled.
pub async fn hash_blocking(password: String) -> Result<String, BlogError> {
    tokio::task::spawn_blocking(move || hash(&password))
        .await
        .map_err(|e| BlogError::PasswordHash(e.to_string()))?
}

pub async fn verify_blocking(password: String, hash: String) -> Result<bool, BlogError> {
    tokio::task::spawn_blocking(move || verify(&password, &hash))
        .await
        .map_err(|e| BlogError::PasswordHash(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hashed = hash("pass123").unwrap();
        assert!(hashed.starts_with("$argon2id$"));
        assert!(verify("pass123", &hashed).unwrap());
        assert!(!verify("wrong password", &hashed).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash("pass123").unwrap(), hash("pass123").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify("pass123", "not-a-phc-string").is_err());
    }
}
