//! PostgreSQL repository implementation

use super::{
    BlogRepository, CommentRecord, CommentRepository, LikeRecord, LikeRepository, NewComment,
    NewPost, NewUser, PostChanges, PostRecord, PostRepository, RepositoryError, RepositoryResult,
    UserChanges, UserRecord, UserRepository,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Repository backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Turn a foreign-key violation into `MissingReference`
///
/// Constraint names follow Postgres defaults, e.g. `posts_user_id_fkey`.
fn missing_reference(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            let message = match db_err.constraint() {
                Some(constraint) if constraint.contains("user_id") => "User not found",
                _ => "Post not found",
            };
            RepositoryError::MissingReference(message.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

/// Turn a unique-constraint violation into `Conflict`
fn conflict_on_unique(err: sqlx::Error, message: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::Conflict(message.to_string())
        }
        _ => missing_reference(err),
    }
}

#[async_trait]
impl UserRepository for PgRepository {
    async fn create_user(&self, user: NewUser) -> RepositoryResult<UserRecord> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already registered"))
    }

    async fn list_users(&self) -> RepositoryResult<Vec<UserRecord>> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_user_by_id(&self, id: i64) -> RepositoryResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_user(
        &self,
        id: i64,
        changes: UserChanges,
    ) -> RepositoryResult<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already registered"))
    }

    async fn delete_user(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PostRepository for PgRepository {
    async fn create_post(&self, post: NewPost) -> RepositoryResult<PostRecord> {
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            INSERT INTO posts (user_id, title, body)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, body, created_at, updated_at
            "#,
        )
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.body)
        .fetch_one(&self.pool)
        .await
        .map_err(missing_reference)?;

        Ok(post)
    }

    async fn list_posts(&self, author: Option<i64>) -> RepositoryResult<Vec<PostRecord>> {
        let posts = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, user_id, title, body, created_at, updated_at
            FROM posts
            WHERE $1::BIGINT IS NULL OR user_id = $1
            ORDER BY id
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_post_by_id(&self, id: i64) -> RepositoryResult<Option<PostRecord>> {
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, user_id, title, body, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update_post(
        &self,
        id: i64,
        changes: PostChanges,
    ) -> RepositoryResult<Option<PostRecord>> {
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.body)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete_post(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for PgRepository {
    async fn create_comment(&self, comment: NewComment) -> RepositoryResult<CommentRecord> {
        let comment = sqlx::query_as::<_, CommentRecord>(
            r#"
            INSERT INTO comments (post_id, user_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.body)
        .fetch_one(&self.pool)
        .await
        .map_err(missing_reference)?;

        Ok(comment)
    }

    async fn list_comments_for_post(&self, post_id: i64) -> RepositoryResult<Vec<CommentRecord>> {
        let comments = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, post_id, user_id, body, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn find_comment_by_id(&self, id: i64) -> RepositoryResult<Option<CommentRecord>> {
        let comment = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, post_id, user_id, body, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn update_comment(
        &self,
        id: i64,
        body: String,
    ) -> RepositoryResult<Option<CommentRecord>> {
        let comment = sqlx::query_as::<_, CommentRecord>(
            r#"
            UPDATE comments SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, post_id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete_comment(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LikeRepository for PgRepository {
    async fn create_like(&self, post_id: i64, user_id: i64) -> RepositoryResult<LikeRecord> {
        sqlx::query_as::<_, LikeRecord>(
            r#"
            INSERT INTO likes (post_id, user_id)
            VALUES ($1, $2)
            RETURNING id, post_id, user_id, created_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Post already liked"))
    }

    async fn list_likes_for_post(&self, post_id: i64) -> RepositoryResult<Vec<LikeRecord>> {
        let likes = sqlx::query_as::<_, LikeRecord>(
            r#"
            SELECT id, post_id, user_id, created_at
            FROM likes
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn find_like(&self, post_id: i64, user_id: i64) -> RepositoryResult<Option<LikeRecord>> {
        let like = sqlx::query_as::<_, LikeRecord>(
            r#"
            SELECT id, post_id, user_id, created_at
            FROM likes
            WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(like)
    }

    async fn delete_like(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BlogRepository for PgRepository {
    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
