use axum::{Json, extract::State};
use tracing::info;

use crate::error::BlogError;
use crate::middleware::JsonBody;
use crate::router::BlogState;
use crate::service::password;
use crate::types::{UserAction, UserPayload};

/// POST /login -> access token as a JSON string.
pub async fn login(
    State(state): State<BlogState>,
    JsonBody(mut payload): JsonBody<UserPayload>,
) -> Result<Json<String>, BlogError> {
    payload.prepare();
    payload.validate(UserAction::Login)?;
    let token = sign_in(&state, &payload.email, payload.password).await?;
    Ok(Json(token))
}

/// Check an email/password pair and issue a token for its user.
pub async fn sign_in(
    state: &BlogState,
    email: &str,
    password: String,
) -> Result<String, BlogError> {
    let login = match state.storage.get_login_by_email(email).await {
        Ok(login) => login,
        Err(BlogError::UserNotFound) => return Err(BlogError::IncorrectDetails),
        Err(e) => return Err(e),
    };

    if !password::verify_blocking(password, login.password).await? {
        return Err(BlogError::IncorrectPassword);
    }

    info!(user_id = login.id, "user signed in");
    state.tokens.issue(login.id)
}
