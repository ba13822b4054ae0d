#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use blog_api::db::{BlogStorage, Post, User};
use blog_api::service::{TokenService, password};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const PASSWORD: &str = "pass123";
pub const SECRET: &[u8] = b"integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub storage: BlogStorage,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub async fn spawn_app() -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "blog-api-test-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let storage = BlogStorage::connect(&database_url)
        .await
        .expect("failed to open test database");

    let tokens = TokenService::new(SECRET, Duration::from_secs(3600));
    let state = blog_api::BlogState::new(storage.clone(), tokens);
    let router = blog_api::blog_router(state);

    TestApp {
        router,
        storage,
        db_path,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<&str>,
    ) -> TestResponse {
        self.dispatch(method, uri, authorization, body, Some("application/json"))
            .await
    }

    /// Like [`TestApp::send`], but the body goes out without a `content-type` header.
    pub async fn send_untyped(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: &str,
    ) -> TestResponse {
        self.dispatch(method, uri, authorization, Some(body), None)
            .await
    }

    async fn dispatch(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<&str>,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = authorization {
            builder = builder.header("authorization", auth);
        }
        if let (Some(_), Some(ct)) = (body, content_type) {
            builder = builder.header("content-type", ct);
        }
        let request = match body {
            Some(payload) => builder.body(Body::from(payload.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let resp = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn seed_user(&self, username: &str, email: &str) -> User {
        let hash = password::hash(PASSWORD).expect("hash password");
        self.storage
            .create_user(username, email, &hash)
            .await
            .expect("seed user")
    }

    /// Two users: "jcousteau" (first) and "abuhlmann" (second).
    pub async fn seed_users(&self) -> (User, User) {
        let first = self.seed_user("jcousteau", "jcousteau@gmail.com").await;
        let second = self.seed_user("abuhlmann", "albert@buhlmann.com").await;
        (first, second)
    }

    pub async fn seed_post(&self, title: &str, author: &User) -> Post {
        self.storage
            .create_post(title, "Seeded content", author.id)
            .await
            .expect("seed post")
    }

    /// Log in through the API and return a ready-to-use `Authorization` value.
    pub async fn bearer(&self, email: &str) -> String {
        let body = format!(r#"{{"email": "{email}", "password": "{PASSWORD}"}}"#);
        let resp = self.send("POST", "/login", None, Some(&body)).await;
        assert_eq!(resp.status, StatusCode::OK, "login failed: {:?}", resp.body);
        let token = resp.body.as_str().expect("token is a JSON string");
        format!("Bearer {token}")
    }
}
