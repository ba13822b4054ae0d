use serde::Deserialize;

use super::{MAX_CONTENT_LEN, MAX_NAME_LEN, clean, too_long};
use crate::error::BlogError;

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    #[serde(alias = "authorID")]
    pub author_id: i64,
}

impl PostPayload {
    pub fn prepare(&mut self) {
        self.title = clean(&self.title);
        self.content = clean(&self.content);
    }

    pub fn validate(&self) -> Result<(), BlogError> {
        if self.title.is_empty() {
            return Err(BlogError::Validation("Required: Title"));
        }
        if self.content.is_empty() {
            return Err(BlogError::Validation("Required: Content"));
        }
        if self.author_id < 1 {
            return Err(BlogError::Validation("Required: Author"));
        }
        if too_long(&self.title, MAX_NAME_LEN) {
            return Err(BlogError::Validation("Too Long: Title"));
        }
        if too_long(&self.content, MAX_CONTENT_LEN) {
            return Err(BlogError::Validation("Too Long: Content"));
        }
        Ok(())
    }
}
