use crate::db::BlogStorage;
use crate::db::models::{Post, User};
use crate::error::BlogError;
use crate::service::password;
use tracing::info;

pub const SEED_PASSWORD: &str = "pass123";

const SEED_USERS: [(&str, &str); 2] = [("ada", "ada@example.com"), ("grace", "grace@example.com")];

const SEED_POSTS: [(&str, &str); 2] = [
    ("Hello, world", "The first post on this blog."),
    ("Second thoughts", "Another post, by another author."),
];

/// Drop and re-create the tables, then insert two users with one post each.
pub async fn load(storage: &BlogStorage) -> Result<(Vec<User>, Vec<Post>), BlogError> {
    storage.reset_schema().await?;
    info!("tables dropped and re-created");

    let hash = password::hash_blocking(SEED_PASSWORD.to_string()).await?;
    let mut users = Vec::with_capacity(SEED_USERS.len());
    let mut posts = Vec::with_capacity(SEED_POSTS.len());

    for ((username, email), (title, content)) in SEED_USERS.into_iter().zip(SEED_POSTS) {
        let user = storage.create_user(username, email, &hash).await?;
        let post = storage.create_post(title, content, user.id).await?;
        users.push(user);
        posts.push(post);
    }

    info!(users = users.len(), posts = posts.len(), "seed data loaded");
    Ok((users, posts))
}
