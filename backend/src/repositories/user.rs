//! User records and repository trait

use super::RepositoryResult;
use async_trait::async_trait;
use blog_api_shared::UserResponse;
use chrono::{DateTime, Utc};

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Input for updating a user; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is taken
    async fn create_user(&self, user: NewUser) -> RepositoryResult<UserRecord>;

    async fn list_users(&self) -> RepositoryResult<Vec<UserRecord>>;

    async fn find_user_by_id(&self, id: i64) -> RepositoryResult<Option<UserRecord>>;

    /// Exact, case-sensitive match
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserRecord>>;

    /// `None` when no user has this id
    async fn update_user(&self, id: i64, changes: UserChanges)
        -> RepositoryResult<Option<UserRecord>>;

    /// Removes the user with everything they own. `false` when nothing was deleted.
    async fn delete_user(&self, id: i64) -> RepositoryResult<bool>;
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
