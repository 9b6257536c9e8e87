//! Like records and repository trait

use super::RepositoryResult;
use async_trait::async_trait;
use blog_api_shared::LikeResponse;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LikeRecord {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Fails with `Conflict` when `user_id` already likes `post_id`
    async fn create_like(&self, post_id: i64, user_id: i64) -> RepositoryResult<LikeRecord>;

    async fn list_likes_for_post(&self, post_id: i64) -> RepositoryResult<Vec<LikeRecord>>;

    async fn find_like(&self, post_id: i64, user_id: i64) -> RepositoryResult<Option<LikeRecord>>;

    async fn delete_like(&self, id: i64) -> RepositoryResult<bool>;
}

impl From<LikeRecord> for LikeResponse {
    fn from(like: LikeRecord) -> Self {
        Self {
            id: like.id,
            post_id: like.post_id,
            user_id: like.user_id,
            created_at: like.created_at,
        }
    }
}
