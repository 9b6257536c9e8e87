//! Comment service

use crate::error::ApiError;
use crate::repositories::{CommentRecord, CommentRepository, NewComment, PostRepository};
use crate::services::PostService;
use blog_api_shared::{CommentRequest, CommentResponse};
use tracing::info;

pub struct CommentService;

impl CommentService {
    pub async fn list_for_post<R: PostRepository + CommentRepository + ?Sized>(
        repo: &R,
        post_id: i64,
    ) -> Result<Vec<CommentResponse>, ApiError> {
        PostService::find(repo, post_id).await?;
        let comments = repo.list_comments_for_post(post_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    pub async fn get<R: CommentRepository + ?Sized>(
        repo: &R,
        id: i64,
    ) -> Result<CommentResponse, ApiError> {
        Ok(Self::find(repo, id).await?.into())
    }

    pub async fn create<R: PostRepository + CommentRepository + ?Sized>(
        repo: &R,
        actor: i64,
        post_id: i64,
        req: CommentRequest,
    ) -> Result<CommentResponse, ApiError> {
        PostService::find(repo, post_id).await?;

        let comment = repo
            .create_comment(NewComment {
                post_id,
                user_id: actor,
                body: req.body,
            })
            .await?;

        info!(comment_id = comment.id, post_id, user_id = actor, "Comment created");
        Ok(comment.into())
    }

    pub async fn update<R: CommentRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
        req: CommentRequest,
    ) -> Result<CommentResponse, ApiError> {
        Self::find_owned(repo, actor, id).await?;

        let comment = repo
            .update_comment(id, req.body)
            .await?
            .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

        info!(comment_id = id, "Comment updated");
        Ok(comment.into())
    }

    pub async fn delete<R: CommentRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
    ) -> Result<(), ApiError> {
        Self::find_owned(repo, actor, id).await?;

        if !repo.delete_comment(id).await? {
            return Err(ApiError::NotFound("Comment not found".to_string()));
        }

        info!(comment_id = id, "Comment deleted");
        Ok(())
    }

    async fn find<R: CommentRepository + ?Sized>(
        repo: &R,
        id: i64,
    ) -> Result<CommentRecord, ApiError> {
        repo.find_comment_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))
    }

    async fn find_owned<R: CommentRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
    ) -> Result<CommentRecord, ApiError> {
        let comment = Self::find(repo, id).await?;
        if comment.user_id != actor {
            return Err(ApiError::Forbidden(
                "You can only modify your own comments".to_string(),
            ));
        }
        Ok(comment)
    }
}
