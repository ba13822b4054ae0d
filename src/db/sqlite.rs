use crate::db::models::{Post, User, UserLogin};
use crate::db::schema::{SQLITE_DROP, SQLITE_INIT};
use crate::error::BlogError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const USER_COLUMNS: &str = "id, username, email, created_at, updated_at";

const POST_SELECT: &str = r#"
    SELECT p.id AS id, p.title AS title, p.content AS content, p.author_id AS author_id,
           p.created_at AS created_at, p.updated_at AS updated_at,
           u.username AS author_username, u.email AS author_email,
           u.created_at AS author_created_at, u.updated_at AS author_updated_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
    WHERE p.deleted_at IS NULL AND u.deleted_at IS NULL"#;

#[derive(Clone)]
pub struct BlogStorage {
    pool: SqlitePool,
}

impl BlogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, BlogError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BlogError> {
        self.execute_script(SQLITE_INIT).await
    }

    /// Drop both tables and build them again from scratch.
    pub async fn reset_schema(&self) -> Result<(), BlogError> {
        self.execute_script(SQLITE_DROP).await?;
        self.init_schema().await
    }

    async fn execute_script(&self, script: &str) -> Result<(), BlogError> {
        // sqlx::query runs a single statement at a time
        for stmt in script.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, BlogError> {
        let now = Utc::now();
        let id = sqlx::query(
            r#"INSERT INTO users (username, email, password, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(BlogError::from_write)?
        .last_insert_rowid();
        debug!(user_id = id, "user created");
        self.get_user(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, BlogError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, BlogError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BlogError::UserNotFound)
    }

    /// Look up the stored hash for a live user by email.
    pub async fn get_login_by_email(&self, email: &str) -> Result<UserLogin, BlogError> {
        sqlx::query_as::<_, UserLogin>(
            "SELECT id, password FROM users WHERE email = ? AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(BlogError::UserNotFound)
    }

    pub async fn user_exists(&self, id: i64) -> Result<bool, BlogError> {
        let rec: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = ? AND deleted_at IS NULL")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(rec.is_some())
    }

    /// Overwrite username, email and password hash of a live user.
    pub async fn update_user(
        &self,
        id: i64,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, BlogError> {
        let res = sqlx::query(
            r#"UPDATE users SET
                username = ?,
                email = ?,
                password = ?,
                updated_at = ?
              WHERE id = ? AND deleted_at IS NULL"#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(BlogError::from_write)?;
        if res.rows_affected() == 0 {
            return Err(BlogError::UserNotFound);
        }
        self.get_user(id).await
    }

    /// Soft-delete a user together with all of their posts.
    pub async fn delete_user(&self, id: i64) -> Result<u64, BlogError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let res = sqlx::query("UPDATE users SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            return Err(BlogError::UserNotFound);
        }

        let posts = sqlx::query(
            "UPDATE posts SET deleted_at = ? WHERE author_id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(
            user_id = id,
            posts = posts.rows_affected(),
            "user soft-deleted"
        );
        Ok(res.rows_affected())
    }

    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<Post, BlogError> {
        let now = Utc::now();
        let id = sqlx::query(
            r#"INSERT INTO posts (title, content, author_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(BlogError::from_write)?
        .last_insert_rowid();
        debug!(post_id = id, author_id, "post created");
        self.get_post(id).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, BlogError> {
        let sql = format!("{POST_SELECT} ORDER BY p.id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_post).collect()
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, BlogError> {
        let sql = format!("{POST_SELECT} AND p.id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BlogError::PostNotFound)?;
        Self::row_to_post(row)
    }

    pub async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<Post, BlogError> {
        let res = sqlx::query(
            r#"UPDATE posts SET
                title = ?,
                content = ?,
                author_id = ?,
                updated_at = ?
              WHERE id = ? AND deleted_at IS NULL"#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(BlogError::from_write)?;
        if res.rows_affected() == 0 {
            return Err(BlogError::PostNotFound);
        }
        self.get_post(id).await
    }

    pub async fn delete_post(&self, id: i64) -> Result<u64, BlogError> {
        let res = sqlx::query("UPDATE posts SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(BlogError::PostNotFound);
        }
        Ok(res.rows_affected())
    }

    fn row_to_post(row: SqliteRow) -> Result<Post, BlogError> {
        let author_id: i64 = row.try_get("author_id")?;
        let author_created_at: DateTime<Utc> = row.try_get("author_created_at")?;
        let author_updated_at: DateTime<Utc> = row.try_get("author_updated_at")?;

        Ok(Post {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            author_id,
            author: User {
                id: author_id,
                username: row.try_get("author_username")?,
                email: row.try_get("author_email")?,
                created_at: author_created_at,
                updated_at: author_updated_at,
            },
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_storage() -> BlogStorage {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid url")
            .foreign_keys(true);
        // one connection: every in-memory connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .expect("open in-memory sqlite");
        let storage = BlogStorage::new(pool);
        storage.init_schema().await.expect("init schema");
        storage
    }

    #[tokio::test]
    async fn duplicate_email_is_reported_by_column() {
        let storage = memory_storage().await;
        storage
            .create_user("jcousteau", "jcousteau@gmail.com", "hash")
            .await
            .expect("first insert");
        let err = storage
            .create_user("abuhlmann", "jcousteau@gmail.com", "hash")
            .await
            .expect_err("duplicate email");
        assert!(matches!(err, BlogError::Duplicate("Email Already Used")));

        let err = storage
            .create_user("jcousteau", "other@gmail.com", "hash")
            .await
            .expect_err("duplicate username");
        assert!(matches!(err, BlogError::Duplicate("Username Already Taken")));
    }

    #[tokio::test]
    async fn post_reads_assemble_the_author() {
        let storage = memory_storage().await;
        let user = storage
            .create_user("phlesh", "phlesh@gmail.com", "hash")
            .await
            .expect("user");
        let post = storage
            .create_post("Title 1", "Content 1", user.id)
            .await
            .expect("post");
        assert_eq!(post.author, user);

        let listed = storage.list_posts().await.expect("list");
        assert_eq!(listed, vec![post]);
    }

    #[tokio::test]
    async fn soft_deleted_user_takes_posts_along() {
        let storage = memory_storage().await;
        let user = storage
            .create_user("phlesh", "phlesh@gmail.com", "hash")
            .await
            .expect("user");
        let post = storage
            .create_post("Title 1", "Content 1", user.id)
            .await
            .expect("post");

        assert_eq!(storage.delete_user(user.id).await.expect("delete"), 1);
        assert!(!storage.user_exists(user.id).await.expect("exists"));
        assert!(matches!(
            storage.get_post(post.id).await,
            Err(BlogError::PostNotFound)
        ));
        assert!(storage.list_users().await.expect("list").is_empty());
        assert!(matches!(
            storage.delete_user(user.id).await,
            Err(BlogError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn soft_deleted_title_stays_reserved() {
        let storage = memory_storage().await;
        let user = storage
            .create_user("phlesh", "phlesh@gmail.com", "hash")
            .await
            .expect("user");
        let post = storage
            .create_post("Title 1", "Content 1", user.id)
            .await
            .expect("post");
        storage.delete_post(post.id).await.expect("delete");

        let err = storage
            .create_post("Title 1", "Content 2", user.id)
            .await
            .expect_err("title still unique");
        assert!(matches!(err, BlogError::Duplicate("Title Already Used")));
    }
}
