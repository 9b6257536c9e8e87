//! Like handlers, mounted at `/api/posts/:id/likes`

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ResourceId;
use crate::services::LikeService;
use crate::state::AppState;
use axum::{extract::State, Json};
use blog_api_shared::{ApiResponse, DeletedResponse, LikeResponse};

/// GET /api/posts/:id/likes
pub(super) async fn list_likes(
    State(state): State<AppState>,
    ResourceId(post_id): ResourceId,
) -> ApiResult<Json<ApiResponse<Vec<LikeResponse>>>> {
    let likes = LikeService::list_for_post(state.repo(), post_id).await?;
    Ok(Json(ApiResponse::success(likes)))
}

/// POST /api/posts/:id/likes
pub(super) async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(post_id): ResourceId,
) -> ApiResult<Json<ApiResponse<LikeResponse>>> {
    let like = LikeService::like(state.repo(), auth.user_id, post_id).await?;
    Ok(Json(ApiResponse::success(like)))
}

/// DELETE /api/posts/:id/likes
///
/// Removes the caller's like; the response carries the like's id.
pub(super) async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(post_id): ResourceId,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    let id = LikeService::unlike(state.repo(), auth.user_id, post_id).await?;
    Ok(Json(ApiResponse::success(DeletedResponse { id })))
}
