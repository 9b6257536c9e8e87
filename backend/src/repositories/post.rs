//! Post records and repository trait

use super::RepositoryResult;
use async_trait::async_trait;
use blog_api_shared::PostResponse;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRecord {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> RepositoryResult<PostRecord>;

    /// All posts oldest first, optionally restricted to one author
    async fn list_posts(&self, author: Option<i64>) -> RepositoryResult<Vec<PostRecord>>;

    async fn find_post_by_id(&self, id: i64) -> RepositoryResult<Option<PostRecord>>;

    async fn update_post(&self, id: i64, changes: PostChanges)
        -> RepositoryResult<Option<PostRecord>>;

    /// Removes the post with its comments and likes
    async fn delete_post(&self, id: i64) -> RepositoryResult<bool>;
}

impl From<PostRecord> for PostResponse {
    fn from(post: PostRecord) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            body: post.body,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
