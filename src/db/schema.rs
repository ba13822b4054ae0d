//! SQL DDL for the blog tables.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users.username` and `users.email` UNIQUE
/// - `posts.title` UNIQUE, `posts.author_id` referencing `users(id)`
/// - `deleted_at` soft-delete marker on both tables (NULL while live)
///
/// Timestamps are stored as RFC3339 text.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_deleted_at ON users(deleted_at);

CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL,
    author_id INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_posts_author_id ON posts(author_id);
CREATE INDEX IF NOT EXISTS idx_posts_deleted_at ON posts(deleted_at);
"#;

/// Drops both tables, children first.
pub const SQLITE_DROP: &str = r#"
DROP TABLE IF EXISTS posts;
DROP TABLE IF EXISTS users;
"#;
