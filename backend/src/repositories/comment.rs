//! Comment records and repository trait

use super::RepositoryResult;
use async_trait::async_trait;
use blog_api_shared::CommentResponse;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: i64,
    pub body: String,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: NewComment) -> RepositoryResult<CommentRecord>;

    /// Comments on one post, oldest first
    async fn list_comments_for_post(&self, post_id: i64) -> RepositoryResult<Vec<CommentRecord>>;

    async fn find_comment_by_id(&self, id: i64) -> RepositoryResult<Option<CommentRecord>>;

    async fn update_comment(&self, id: i64, body: String)
        -> RepositoryResult<Option<CommentRecord>>;

    async fn delete_comment(&self, id: i64) -> RepositoryResult<bool>;
}

impl From<CommentRecord> for CommentResponse {
    fn from(comment: CommentRecord) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            body: comment.body,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
