//! User routes: registration, login and account management

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ResourceId, ValidatedJson};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use blog_api_shared::{
    ApiResponse, DeletedResponse, LoginRequest, LoginResponse, RegisterUserRequest,
    UpdateUserRequest, UserResponse,
};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register).get(list_users))
        .route("/login", post(login))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// POST /api/users
async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = UserService::register(state.repo(), req).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// POST /api/users/login
///
/// Unknown email and wrong password both answer 404 with the same body.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let response = UserService::login(state.repo(), state.jwt(), req).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// GET /api/users
async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserService::list(state.repo()).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /api/users/:id
async fn get_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = UserService::get(state.repo(), id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /api/users/:id
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = UserService::update(state.repo(), auth.user_id, id, req).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// DELETE /api/users/:id
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    UserService::delete(state.repo(), auth.user_id, id).await?;
    Ok(Json(ApiResponse::success(DeletedResponse { id })))
}
