//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `BlogStorage`, the user and post operations

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Post, User, UserLogin};
pub use schema::{SQLITE_DROP, SQLITE_INIT};
pub use sqlite::{BlogStorage, SqlitePool};
