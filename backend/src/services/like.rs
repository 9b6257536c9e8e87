//! Like service

use crate::error::ApiError;
use crate::repositories::{LikeRepository, PostRepository};
use crate::services::PostService;
use blog_api_shared::LikeResponse;
use tracing::info;

pub struct LikeService;

impl LikeService {
    pub async fn list_for_post<R: PostRepository + LikeRepository + ?Sized>(
        repo: &R,
        post_id: i64,
    ) -> Result<Vec<LikeResponse>, ApiError> {
        PostService::find(repo, post_id).await?;
        let likes = repo.list_likes_for_post(post_id).await?;
        Ok(likes.into_iter().map(LikeResponse::from).collect())
    }

    /// Like a post; liking it twice is a conflict
    pub async fn like<R: PostRepository + LikeRepository + ?Sized>(
        repo: &R,
        actor: i64,
        post_id: i64,
    ) -> Result<LikeResponse, ApiError> {
        PostService::find(repo, post_id).await?;

        let like = repo.create_like(post_id, actor).await?;

        info!(post_id, user_id = actor, "Post liked");
        Ok(like.into())
    }

    /// Remove the caller's like, returning its id
    pub async fn unlike<R: PostRepository + LikeRepository + ?Sized>(
        repo: &R,
        actor: i64,
        post_id: i64,
    ) -> Result<i64, ApiError> {
        PostService::find(repo, post_id).await?;

        let like = repo
            .find_like(post_id, actor)
            .await?
            .ok_or_else(|| ApiError::NotFound("Like not found".to_string()))?;

        if !repo.delete_like(like.id).await? {
            return Err(ApiError::NotFound("Like not found".to_string()));
        }

        info!(post_id, user_id = actor, "Post unliked");
        Ok(like.id)
    }
}
