use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum BlogError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Invalid ID")]
    InvalidId,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User Not Found")]
    UserNotFound,

    #[error("Post Not Found")]
    PostNotFound,

    #[error("Incorrect Details")]
    IncorrectDetails,

    #[error("Incorrect Password")]
    IncorrectPassword,

    #[error("{0}")]
    Duplicate(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl BlogError {
    /// Turn a unique-constraint violation into a user-facing duplicate error.
    /// Other database errors pass through untouched.
    pub fn from_write(err: SqlxError) -> Self {
        match &err {
            SqlxError::Database(db_err) if db_err.is_unique_violation() => {
                BlogError::Duplicate(format_error(db_err.message()))
            }
            _ => BlogError::DatabaseError(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BlogError::Validation(_)
            | BlogError::InvalidBody(_)
            | BlogError::IncorrectDetails
            | BlogError::IncorrectPassword => StatusCode::UNPROCESSABLE_ENTITY,
            BlogError::InvalidId => StatusCode::BAD_REQUEST,
            BlogError::Unauthorized => StatusCode::UNAUTHORIZED,
            BlogError::UserNotFound | BlogError::PostNotFound => StatusCode::NOT_FOUND,
            BlogError::Duplicate(_)
            | BlogError::DatabaseError(_)
            | BlogError::PasswordHash(_)
            | BlogError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map driver error text for a uniqueness violation onto a message naming the column.
pub fn format_error(message: &str) -> &'static str {
    if message.contains("username") {
        "Username Already Taken"
    } else if message.contains("email") {
        "Email Already Used"
    } else if message.contains("title") {
        "Title Already Used"
    } else {
        "Incorrect Details"
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            BlogError::DatabaseError(_) | BlogError::PasswordHash(_) | BlogError::Token(_) => {
                error!(error = %self, "request failed with internal error");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_the_conflicting_column() {
        assert_eq!(
            format_error("UNIQUE constraint failed: users.username"),
            "Username Already Taken"
        );
        assert_eq!(
            format_error("UNIQUE constraint failed: users.email"),
            "Email Already Used"
        );
        assert_eq!(
            format_error("UNIQUE constraint failed: posts.title"),
            "Title Already Used"
        );
        assert_eq!(format_error("something else"), "Incorrect Details");
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            BlogError::Validation("Required: Title").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(BlogError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(BlogError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(BlogError::PostNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            BlogError::Duplicate("Title Already Used").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_message_is_exposed() {
        assert_eq!(
            BlogError::Duplicate("Email Already Used").to_string(),
            "Email Already Used"
        );
    }
}
