use serde::Deserialize;
use validator::ValidateEmail;

use super::{MAX_NAME_LEN, clean, too_long};
use crate::error::BlogError;

/// Body of `POST /users`, `PUT /users/{id}` and `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Which operation a [`UserPayload`] is checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Create,
    Update,
    Login,
}

impl UserPayload {
    /// Trim and escape username and email. The password is left as typed.
    pub fn prepare(&mut self) {
        self.username = clean(&self.username);
        self.email = clean(&self.email);
    }

    pub fn validate(&self, action: UserAction) -> Result<(), BlogError> {
        if action != UserAction::Login && self.username.is_empty() {
            return Err(BlogError::Validation("Required: Username"));
        }
        if self.password.is_empty() {
            return Err(BlogError::Validation("Required: Password"));
        }
        if self.email.is_empty() {
            return Err(BlogError::Validation("Required: Email"));
        }
        if !self.email.validate_email() {
            return Err(BlogError::Validation("Invalid Email"));
        }
        if action != UserAction::Login && too_long(&self.username, MAX_NAME_LEN) {
            return Err(BlogError::Validation("Too Long: Username"));
        }
        if too_long(&self.email, MAX_NAME_LEN) {
            return Err(BlogError::Validation("Too Long: Email"));
        }
        Ok(())
    }
}
