// src/db/repository.rs
// DOCUMENTATION: Database access layer - all SQL queries
// PURPOSE: Abstract database operations from the HTTP handlers

use crate::db::Database;
use crate::deadline::Deadline;
use crate::errors::PostsError;
use crate::models::Post;
use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::{Arguments, FromRow};

/// Most posts returned by a single listing
pub const RECENT_POSTS_LIMIT: usize = 100;

const RECENT_POSTS_SQL: &str = r#"
    SELECT id, title, body, created_at
    FROM posts
    ORDER BY id DESC
    LIMIT $1
"#;

/// Read access to posts
/// DOCUMENTATION: Handlers depend on this trait rather than on the pool so
/// tests can substitute an in-memory implementation
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Newest posts first, at most RECENT_POSTS_LIMIT of them
    async fn recent_posts(&self, deadline: &Deadline) -> Result<Vec<Post>, PostsError>;
}

/// PostRepository: PostgreSQL-backed PostStore
pub struct PostRepository {
    db: Database,
}

impl PostRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn recent_posts(&self, deadline: &Deadline) -> Result<Vec<Post>, PostsError> {
        let mut args = PgArguments::default();
        args.add(RECENT_POSTS_LIMIT as i64);

        let posts = self
            .db
            .query(deadline, RECENT_POSTS_SQL, args, |row| Post::from_row(row))
            .await
            .map_err(|e| {
                log::error!("Failed to list posts: {}", e);
                e
            })?;

        log::debug!(
            "Fetched {} posts ({:?} of budget left)",
            posts.len(),
            deadline.remaining()
        );
        Ok(posts)
    }
}
