use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. Fails with `RepoError::Constraint` when the email
    /// is already taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository. Every operation is scoped to the owning user.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Post>, RepoError>;

    /// Persist a validated post for `owner_id`.
    async fn create(&self, owner_id: i64, post: NewPost) -> Result<Post, RepoError>;

    /// Delete post `id` if it belongs to `owner_id`.
    ///
    /// Returns `RepoError::NotFound` when no such post exists for that owner,
    /// whether it is missing entirely or owned by someone else.
    async fn delete(&self, owner_id: i64, id: i64) -> Result<(), RepoError>;
}
