//! API request and response types

use crate::validation::{parse_positive_id, Check, Ruleset, ValidatedInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `result` value of every successful response
pub const RESULT_SUCCESS: &str = "success";

/// Success envelope: `{"result": "success", "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            result: RESULT_SUCCESS.to_string(),
            data,
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorDetail>,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Body of a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i64,
}

// ============================================================================
// Users
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ValidatedInput for RegisterUserRequest {
    fn ruleset() -> Ruleset {
        Ruleset::new()
            .field(
                "name",
                [Check::Required, Check::String, Check::MinLength(1), Check::MaxLength(100)],
            )
            .field("email", [Check::Required, Check::Email, Check::MaxLength(255)])
            .field(
                "password",
                [Check::Required, Check::String, Check::MinLength(1), Check::MaxLength(128)],
            )
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ValidatedInput for LoginRequest {
    fn ruleset() -> Ruleset {
        Ruleset::new()
            .field("email", [Check::Required, Check::Email])
            .field("password", [Check::Required, Check::String])
    }
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ValidatedInput for UpdateUserRequest {
    fn ruleset() -> Ruleset {
        Ruleset::new()
            .field("name", [Check::String, Check::MinLength(1), Check::MaxLength(100)])
            .field("email", [Check::Email, Check::MaxLength(255)])
            .field(
                "password",
                [Check::String, Check::MinLength(1), Check::MaxLength(128)],
            )
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// Posts
// ============================================================================

/// New post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
}

impl ValidatedInput for CreatePostRequest {
    fn ruleset() -> Ruleset {
        Ruleset::new()
            .field(
                "title",
                [Check::Required, Check::String, Check::MinLength(1), Check::MaxLength(200)],
            )
            .field("body", [Check::Required, Check::String, Check::MinLength(1)])
    }
}

/// Partial post update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ValidatedInput for UpdatePostRequest {
    fn ruleset() -> Ruleset {
        Ruleset::new()
            .field("title", [Check::String, Check::MinLength(1), Check::MaxLength(200)])
            .field("body", [Check::String, Check::MinLength(1)])
    }
}

/// Query string of `GET /api/posts`
///
/// Query values arrive as strings, so the author filter stays textual until
/// the ruleset has accepted it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

impl PostListQuery {
    pub fn user_id(&self) -> Option<i64> {
        self.user_id
            .as_deref()
            .and_then(|raw| parse_positive_id(&serde_json::Value::from(raw)))
    }
}

impl ValidatedInput for PostListQuery {
    fn ruleset() -> Ruleset {
        Ruleset::new().field("user_id", [Check::PositiveInteger])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Comments
// ============================================================================

/// Create or replace a comment body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

impl ValidatedInput for CommentRequest {
    fn ruleset() -> Ruleset {
        Ruleset::new().field(
            "body",
            [Check::Required, Check::String, Check::MinLength(1), Check::MaxLength(2000)],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Likes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
