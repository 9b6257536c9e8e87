//! Route definitions for the blog API
//!
//! Every handler runs the same pipeline, expressed by the order of its
//! extractor arguments:
//!
//! 1. [`AuthUser`](crate::auth::AuthUser) on protected routes (401 on failure)
//! 2. [`ResourceId`](crate::extract::ResourceId) for `:id` paths (422)
//! 3. [`ValidatedJson`](crate::extract::ValidatedJson) or
//!    [`ValidatedQuery`](crate::extract::ValidatedQuery) (400 / 422)
//! 4. the handler body, which calls a service
//!
//! A rejection at any step short-circuits the rest.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod comments;
mod health;
mod likes;
mod posts;
mod users;


pub use comments::comment_routes;
pub use posts::post_routes;
pub use users::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::user_routes())
        .nest("/posts", posts::post_routes())
        .nest("/comments", comments::comment_routes())
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
