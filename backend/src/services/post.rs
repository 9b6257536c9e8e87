//! Post service

use crate::error::ApiError;
use crate::repositories::{NewPost, PostChanges, PostRecord, PostRepository};
use blog_api_shared::{CreatePostRequest, PostResponse, UpdatePostRequest};
use tracing::info;

pub struct PostService;

impl PostService {
    pub async fn list<R: PostRepository + ?Sized>(
        repo: &R,
        author: Option<i64>,
    ) -> Result<Vec<PostResponse>, ApiError> {
        let posts = repo.list_posts(author).await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    pub async fn get<R: PostRepository + ?Sized>(repo: &R, id: i64) -> Result<PostResponse, ApiError> {
        Ok(Self::find(repo, id).await?.into())
    }

    pub async fn create<R: PostRepository + ?Sized>(
        repo: &R,
        actor: i64,
        req: CreatePostRequest,
    ) -> Result<PostResponse, ApiError> {
        let post = repo
            .create_post(NewPost {
                user_id: actor,
                title: req.title,
                body: req.body,
            })
            .await?;

        info!(post_id = post.id, user_id = actor, "Post created");
        Ok(post.into())
    }

    /// Only the author may edit a post
    pub async fn update<R: PostRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<PostResponse, ApiError> {
        Self::find_owned(repo, actor, id).await?;

        let changes = PostChanges {
            title: req.title,
            body: req.body,
        };
        let post = repo
            .update_post(id, changes)
            .await?
            .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

        info!(post_id = id, "Post updated");
        Ok(post.into())
    }

    /// Only the author may delete a post
    pub async fn delete<R: PostRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
    ) -> Result<(), ApiError> {
        Self::find_owned(repo, actor, id).await?;

        if !repo.delete_post(id).await? {
            return Err(ApiError::NotFound("Post not found".to_string()));
        }

        info!(post_id = id, "Post deleted");
        Ok(())
    }

    /// Fetch a post or fail with 404. Also used by comments and likes.
    pub async fn find<R: PostRepository + ?Sized>(repo: &R, id: i64) -> Result<PostRecord, ApiError> {
        repo.find_post_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))
    }

    async fn find_owned<R: PostRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
    ) -> Result<PostRecord, ApiError> {
        let post = Self::find(repo, id).await?;
        if post.user_id != actor {
            return Err(ApiError::Forbidden(
                "You can only modify your own posts".to_string(),
            ));
        }
        Ok(post)
    }
}
