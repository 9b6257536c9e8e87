//! Post routes, plus the comment and like collections nested under a post

use super::likes;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ResourceId, ValidatedJson, ValidatedQuery};
use crate::services::{CommentService, PostService};
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use blog_api_shared::{
    ApiResponse, CommentRequest, CommentResponse, CreatePostRequest, DeletedResponse,
    PostListQuery, PostResponse, UpdatePostRequest,
};

/// Create post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/:id/comments", get(list_comments).post(create_comment))
        .route(
            "/:id/likes",
            get(likes::list_likes)
                .post(likes::like_post)
                .delete(likes::unlike_post),
        )
}

/// GET /api/posts?user_id=
async fn list_posts(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PostListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<PostResponse>>>> {
    let posts = PostService::list(state.repo(), query.user_id()).await?;
    Ok(Json(ApiResponse::success(posts)))
}

/// POST /api/posts
async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Json<ApiResponse<PostResponse>>> {
    let post = PostService::create(state.repo(), auth.user_id, req).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// GET /api/posts/:id
async fn get_post(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<Json<ApiResponse<PostResponse>>> {
    let post = PostService::get(state.repo(), id).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// PUT /api/posts/:id
async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<ApiResponse<PostResponse>>> {
    let post = PostService::update(state.repo(), auth.user_id, id, req).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// DELETE /api/posts/:id
///
/// Comments and likes on the post go with it.
async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    PostService::delete(state.repo(), auth.user_id, id).await?;
    Ok(Json(ApiResponse::success(DeletedResponse { id })))
}

/// GET /api/posts/:id/comments
async fn list_comments(
    State(state): State<AppState>,
    ResourceId(post_id): ResourceId,
) -> ApiResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    let comments = CommentService::list_for_post(state.repo(), post_id).await?;
    Ok(Json(ApiResponse::success(comments)))
}

/// POST /api/posts/:id/comments
async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(post_id): ResourceId,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let comment = CommentService::create(state.repo(), auth.user_id, post_id, req).await?;
    Ok(Json(ApiResponse::success(comment)))
}
