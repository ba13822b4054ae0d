use axum::{Json, body::Bytes, extract::State, response::Response};
use tracing::info;

use super::{created, deleted};
use crate::db::Post;
use crate::error::BlogError;
use crate::middleware::{AuthUser, JsonBody, ResourceId};
use crate::router::BlogState;
use crate::types::PostPayload;

/// POST /posts -> publish a post as the authenticated user.
pub async fn create_post(
    State(state): State<BlogState>,
    AuthUser(uid): AuthUser,
    JsonBody(mut payload): JsonBody<PostPayload>,
) -> Result<Response, BlogError> {
    payload.prepare();
    payload.validate()?;
    if payload.author_id != uid {
        return Err(BlogError::Unauthorized);
    }

    let post = state
        .storage
        .create_post(&payload.title, &payload.content, uid)
        .await?;

    info!(post_id = post.id, author_id = uid, "post created");
    Ok(created(format!("/posts/{}", post.id), post))
}

pub async fn list_posts(State(state): State<BlogState>) -> Result<Json<Vec<Post>>, BlogError> {
    Ok(Json(state.storage.list_posts().await?))
}

pub async fn get_post(
    State(state): State<BlogState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Post>, BlogError> {
    Ok(Json(state.storage.get_post(id).await?))
}

/// PUT /posts/{id} -> only the author may edit, and the body must name the author too.
///
/// The body is decoded only once the post is known to exist and belong to the caller.
pub async fn update_post(
    State(state): State<BlogState>,
    ResourceId(id): ResourceId,
    AuthUser(uid): AuthUser,
    body: Bytes,
) -> Result<Json<Post>, BlogError> {
    let existing = state.storage.get_post(id).await?;
    if existing.author_id != uid {
        return Err(BlogError::Unauthorized);
    }

    let JsonBody(mut payload) = JsonBody::<PostPayload>::from_bytes(&body)?;
    if payload.author_id != uid {
        return Err(BlogError::Unauthorized);
    }

    payload.prepare();
    payload.validate()?;

    let post = state
        .storage
        .update_post(id, &payload.title, &payload.content, uid)
        .await?;

    info!(post_id = id, author_id = uid, "post updated");
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<BlogState>,
    ResourceId(id): ResourceId,
    AuthUser(uid): AuthUser,
) -> Result<Response, BlogError> {
    let existing = state.storage.get_post(id).await?;
    if existing.author_id != uid {
        return Err(BlogError::Unauthorized);
    }

    state.storage.delete_post(id).await?;
    info!(post_id = id, author_id = uid, "post deleted");
    Ok(deleted(id))
}
