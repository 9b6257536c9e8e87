//! In-memory repository implementation
//!
//! Mirrors the PostgreSQL schema's behavior without a database: sequential
//! ids, unique emails, one like per user and post, foreign keys and cascading
//! deletes. Used by the test suite and for running the API locally.

use super::{
    BlogRepository, CommentRecord, CommentRepository, LikeRecord, LikeRepository, NewComment,
    NewPost, NewUser, PostChanges, PostRecord, PostRepository, RepositoryError, RepositoryResult,
    UserChanges, UserRecord, UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory repository. Clones share the same data.
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    users: BTreeMap<i64, UserRecord>,
    posts: BTreeMap<i64, PostRecord>,
    comments: BTreeMap<i64, CommentRecord>,
    likes: BTreeMap<i64, LikeRecord>,

    // ID sequences
    user_seq: i64,
    post_seq: i64,
    comment_seq: i64,
    like_seq: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

impl LocalData {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    /// Same check the schema's foreign keys make
    fn require_user(&self, user_id: i64) -> RepositoryResult<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(RepositoryError::MissingReference("User not found".to_string()))
        }
    }

    fn require_post(&self, post_id: i64) -> RepositoryResult<()> {
        if self.posts.contains_key(&post_id) {
            Ok(())
        } else {
            Err(RepositoryError::MissingReference("Post not found".to_string()))
        }
    }

    fn remove_post_cascade(&mut self, post_id: i64) -> bool {
        let removed = self.posts.remove(&post_id).is_some();
        if removed {
            self.comments.retain(|_, c| c.post_id != post_id);
            self.likes.retain(|_, l| l.post_id != post_id);
        }
        removed
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(&self, user: NewUser) -> RepositoryResult<UserRecord> {
        let mut data = self.data.write().await;
        if data.email_taken(&user.email, None) {
            return Err(RepositoryError::Conflict("Email already registered".to_string()));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: next_id(&mut data.user_seq),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        data.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_users(&self) -> RepositoryResult<Vec<UserRecord>> {
        Ok(self.data.read().await.users.values().cloned().collect())
    }

    async fn find_user_by_id(&self, id: i64) -> RepositoryResult<Option<UserRecord>> {
        Ok(self.data.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserRecord>> {
        let data = self.data.read().await;
        Ok(data.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(
        &self,
        id: i64,
        changes: UserChanges,
    ) -> RepositoryResult<Option<UserRecord>> {
        let mut data = self.data.write().await;
        if let Some(email) = &changes.email {
            if data.email_taken(email, Some(id)) {
                return Err(RepositoryError::Conflict("Email already registered".to_string()));
            }
        }

        let Some(user) = data.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i64) -> RepositoryResult<bool> {
        let mut data = self.data.write().await;
        if data.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned_posts: Vec<i64> = data
            .posts
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned_posts {
            data.remove_post_cascade(post_id);
        }
        data.comments.retain(|_, c| c.user_id != id);
        data.likes.retain(|_, l| l.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for LocalRepository {
    async fn create_post(&self, post: NewPost) -> RepositoryResult<PostRecord> {
        let mut data = self.data.write().await;
        data.require_user(post.user_id)?;

        let now = Utc::now();
        let record = PostRecord {
            id: next_id(&mut data.post_seq),
            user_id: post.user_id,
            title: post.title,
            body: post.body,
            created_at: now,
            updated_at: now,
        };
        data.posts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_posts(&self, author: Option<i64>) -> RepositoryResult<Vec<PostRecord>> {
        let data = self.data.read().await;
        Ok(data
            .posts
            .values()
            .filter(|p| author.map_or(true, |user_id| p.user_id == user_id))
            .cloned()
            .collect())
    }

    async fn find_post_by_id(&self, id: i64) -> RepositoryResult<Option<PostRecord>> {
        Ok(self.data.read().await.posts.get(&id).cloned())
    }

    async fn update_post(
        &self,
        id: i64,
        changes: PostChanges,
    ) -> RepositoryResult<Option<PostRecord>> {
        let mut data = self.data.write().await;
        let Some(post) = data.posts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(body) = changes.body {
            post.body = body;
        }
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.data.write().await.remove_post_cascade(id))
    }
}

#[async_trait]
impl CommentRepository for LocalRepository {
    async fn create_comment(&self, comment: NewComment) -> RepositoryResult<CommentRecord> {
        let mut data = self.data.write().await;
        data.require_post(comment.post_id)?;
        data.require_user(comment.user_id)?;

        let now = Utc::now();
        let record = CommentRecord {
            id: next_id(&mut data.comment_seq),
            post_id: comment.post_id,
            user_id: comment.user_id,
            body: comment.body,
            created_at: now,
            updated_at: now,
        };
        data.comments.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_comments_for_post(&self, post_id: i64) -> RepositoryResult<Vec<CommentRecord>> {
        let data = self.data.read().await;
        Ok(data
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_comment_by_id(&self, id: i64) -> RepositoryResult<Option<CommentRecord>> {
        Ok(self.data.read().await.comments.get(&id).cloned())
    }

    async fn update_comment(
        &self,
        id: i64,
        body: String,
    ) -> RepositoryResult<Option<CommentRecord>> {
        let mut data = self.data.write().await;
        let Some(comment) = data.comments.get_mut(&id) else {
            return Ok(None);
        };
        comment.body = body;
        comment.updated_at = Utc::now();
        Ok(Some(comment.clone()))
    }

    async fn delete_comment(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.data.write().await.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl LikeRepository for LocalRepository {
    async fn create_like(&self, post_id: i64, user_id: i64) -> RepositoryResult<LikeRecord> {
        let mut data = self.data.write().await;
        data.require_post(post_id)?;
        data.require_user(user_id)?;

        if data
            .likes
            .values()
            .any(|l| l.post_id == post_id && l.user_id == user_id)
        {
            return Err(RepositoryError::Conflict("Post already liked".to_string()));
        }

        let record = LikeRecord {
            id: next_id(&mut data.like_seq),
            post_id,
            user_id,
            created_at: Utc::now(),
        };
        data.likes.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_likes_for_post(&self, post_id: i64) -> RepositoryResult<Vec<LikeRecord>> {
        let data = self.data.read().await;
        Ok(data
            .likes
            .values()
            .filter(|l| l.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_like(&self, post_id: i64, user_id: i64) -> RepositoryResult<Option<LikeRecord>> {
        let data = self.data.read().await;
        Ok(data
            .likes
            .values()
            .find(|l| l.post_id == post_id && l.user_id == user_id)
            .cloned())
    }

    async fn delete_like(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.data.write().await.likes.remove(&id).is_some())
    }
}

#[async_trait]
impl BlogRepository for LocalRepository {
    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
