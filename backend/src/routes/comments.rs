//! Routes for a single comment
//!
//! Listing and creating comments live under `/api/posts/:id/comments`.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ResourceId, ValidatedJson};
use crate::services::CommentService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use blog_api_shared::{ApiResponse, CommentRequest, CommentResponse, DeletedResponse};

/// Create comment routes
pub fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/:id",
        get(get_comment).put(update_comment).delete(delete_comment),
    )
}

/// GET /api/comments/:id
async fn get_comment(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let comment = CommentService::get(state.repo(), id).await?;
    Ok(Json(ApiResponse::success(comment)))
}

/// PUT /api/comments/:id
async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let comment = CommentService::update(state.repo(), auth.user_id, id, req).await?;
    Ok(Json(ApiResponse::success(comment)))
}

/// DELETE /api/comments/:id
async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    CommentService::delete(state.repo(), auth.user_id, id).await?;
    Ok(Json(ApiResponse::success(DeletedResponse { id })))
}
