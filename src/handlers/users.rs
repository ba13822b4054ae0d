use axum::{Json, extract::State, response::Response};
use tracing::info;

use super::{created, deleted};
use crate::db::User;
use crate::error::BlogError;
use crate::middleware::{AuthUser, JsonBody, ResourceId};
use crate::router::BlogState;
use crate::service::password;
use crate::types::{UserAction, UserPayload};

/// POST /users -> register a new user.
pub async fn create_user(
    State(state): State<BlogState>,
    JsonBody(mut payload): JsonBody<UserPayload>,
) -> Result<Response, BlogError> {
    payload.prepare();
    payload.validate(UserAction::Create)?;

    let hash = password::hash_blocking(payload.password).await?;
    let user = state
        .storage
        .create_user(&payload.username, &payload.email, &hash)
        .await?;

    info!(user_id = user.id, "user registered");
    Ok(created(format!("/users/{}", user.id), user))
}

pub async fn list_users(State(state): State<BlogState>) -> Result<Json<Vec<User>>, BlogError> {
    Ok(Json(state.storage.list_users().await?))
}

pub async fn get_user(
    State(state): State<BlogState>,
    ResourceId(id): ResourceId,
) -> Result<Json<User>, BlogError> {
    Ok(Json(state.storage.get_user(id).await?))
}

/// PUT /users/{id} -> replace username, email and password of the caller's own account.
pub async fn update_user(
    State(state): State<BlogState>,
    ResourceId(id): ResourceId,
    AuthUser(uid): AuthUser,
    JsonBody(mut payload): JsonBody<UserPayload>,
) -> Result<Json<User>, BlogError> {
    if uid != id {
        return Err(BlogError::Unauthorized);
    }

    payload.prepare();
    payload.validate(UserAction::Update)?;

    let hash = password::hash_blocking(payload.password).await?;
    let user = state
        .storage
        .update_user(id, &payload.username, &payload.email, &hash)
        .await?;

    info!(user_id = id, "user updated");
    Ok(Json(user))
}

/// DELETE /users/{id} -> soft-delete the caller's own account and posts.
pub async fn delete_user(
    State(state): State<BlogState>,
    ResourceId(id): ResourceId,
    AuthUser(uid): AuthUser,
) -> Result<Response, BlogError> {
    if uid != id {
        return Err(BlogError::Unauthorized);
    }

    state.storage.delete_user(id).await?;
    info!(user_id = id, "user deleted");
    Ok(deleted(id))
}
