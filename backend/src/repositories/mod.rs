//! Database repositories
//!
//! Provides the data access layer. Each resource has its own repository trait;
//! [`BlogRepository`] bundles them so handlers can hold one
//! `Arc<dyn BlogRepository>`.
//!
//! Two implementations exist:
//! - [`PgRepository`]: PostgreSQL via SQLx, used by the server binary
//! - [`LocalRepository`]: in-memory, used by tests and local experiments

pub mod comment;
pub mod like;
pub mod local;
pub mod post;
pub mod postgres;
pub mod user;

use async_trait::async_trait;
use thiserror::Error;

pub use comment::{CommentRecord, CommentRepository, NewComment};
pub use like::{LikeRecord, LikeRepository};
pub use local::LocalRepository;
pub use post::{NewPost, PostChanges, PostRecord, PostRepository};
pub use postgres::PgRepository;
pub use user::{NewUser, UserChanges, UserRecord, UserRepository};

/// Error type for repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The write names a user or post that does not exist
    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Every repository capability the API needs
#[async_trait]
pub trait BlogRepository:
    UserRepository + PostRepository + CommentRepository + LikeRepository
{
    /// Cheap round-trip used by the readiness probe
    async fn ping(&self) -> RepositoryResult<()>;
}
