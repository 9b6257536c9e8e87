//! Authentication extractor
//!
//! [`AuthUser`] is the authorization stage of the request pipeline. Put it
//! before any other extractor in a handler's arguments so that unauthenticated
//! requests are rejected before input validation or persistence runs.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use blog_api_shared::AuthError;
use tracing::debug;

/// Authenticated user extracted from the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Pull the bearer token out of the `Authorization` header
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user_id = bearer_token(&parts.headers)
            .and_then(|token| app_state.jwt().verify(token))
            .map_err(|err| {
                debug!(reason = %err, path = %parts.uri.path(), "Rejected request");
                ApiError::from(err)
            })?;

        let user = AuthUser { user_id };
        parts.extensions.insert(user);
        Ok(user)
    }
}
