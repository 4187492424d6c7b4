//! In-memory repositories - used when no database is configured.
//!
//! Ids are assigned from 1 upward, matching an auto-increment column.
//! Data is lost on process restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use inkwell_core::domain::{NewPost, NewUser, Post, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{PostRepository, UserRepository};

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Email already taken".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: table.allocate_id(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(user.clone());

        tracing::debug!(user_id = user.id, "Created user in memory");
        Ok(user)
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    table: RwLock<Table<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        let mut posts: Vec<Post> = table
            .rows
            .iter()
            .filter(|p| p.user_id == owner_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(posts)
    }

    async fn create(&self, owner_id: i64, post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        let now = Utc::now();
        let post = Post {
            id: table.allocate_id(),
            user_id: owner_id,
            title: post.title,
            content: post.body,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(post.clone());

        Ok(post)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;

        let position = table
            .rows
            .iter()
            .position(|p| p.id == id && p.user_id == owner_id)
            .ok_or(RepoError::NotFound)?;
        table.rows.remove(position);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_newest_first_and_owner_scoped() {
        let repo = InMemoryPostRepository::new();
        let first = repo.create(1, NewPost::new("First", "a")).await.unwrap();
        let second = repo.create(1, NewPost::new("Second", "b")).await.unwrap();
        repo.create(2, NewPost::new("Other", "c")).await.unwrap();

        let posts = repo.list_by_owner(1).await.unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_ids_are_positive_and_increasing() {
        let repo = InMemoryPostRepository::new();
        let a = repo.create(1, NewPost::new("A", "a")).await.unwrap();
        let b = repo.create(1, NewPost::new("B", "b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_delete_requires_ownership() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(1, NewPost::new("Mine", "x")).await.unwrap();

        let err = repo.delete(2, post.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
        assert_eq!(repo.list_by_owner(1).await.unwrap().len(), 1);

        repo.delete(1, post.id).await.unwrap();
        assert!(repo.list_by_owner(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_constraint_error() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(NewUser::guest("device", "hash".to_string()))
            .await
            .unwrap();

        let err = repo
            .create(NewUser::guest("device", "other".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));

        let found = repo.find_by_email(&user.email).await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }
}
