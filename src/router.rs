use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::db::BlogStorage;
use crate::handlers::{
    home::home,
    login::login,
    posts::{create_post, delete_post, get_post, list_posts, update_post},
    users::{create_user, delete_user, get_user, list_users, update_user},
};
use crate::service::TokenService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct BlogState {
    pub storage: BlogStorage,
    pub tokens: Arc<TokenService>,
}

impl BlogState {
    pub fn new(storage: BlogStorage, tokens: TokenService) -> Self {
        Self {
            storage,
            tokens: Arc::new(tokens),
        }
    }
}

pub fn blog_router(state: BlogState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/login", post(login))
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/posts", post(create_post).get(list_posts))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
