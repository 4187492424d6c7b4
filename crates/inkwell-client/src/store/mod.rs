//! Post store with optimistic creation.
//!
//! `create` inserts a local, unconfirmed post before the request is sent and
//! reconciles once it settles: the entry is replaced in place by the server's
//! post on success, or removed on failure. An entry is located by its
//! temporary id, so concurrent creates never touch each other's entries.
//!
//! State lives behind a mutex that is only held for synchronous updates,
//! never across an `.await`.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use thiserror::Error;

use inkwell_shared::dto::{CreatePostRequest, CreatePostResponse};

use crate::api::PostsApi;
use crate::error::ApiError;
use crate::model::{Post, next_temp_id};


pub const FETCH_FAILED: &str = "Failed to fetch posts";
pub const CREATE_FAILED: &str = "Failed to create post";
pub const CREATE_RETRY: &str = "Failed to create post. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete post";

/// A failed `create`, already rolled back.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CreateFailure {
    /// Text to show the user: the server's field messages joined with `", "`,
    /// or a generic retry hint.
    pub message: String,
    #[source]
    pub cause: ApiError,
}

impl CreateFailure {
    fn new(cause: ApiError) -> Self {
        let message = match cause.validation_errors() {
            Some(errors) if !errors.is_empty() => errors.to_string(),
            _ => CREATE_RETRY.to_string(),
        };
        Self { message, cause }
    }
}

/// Point-in-time copy of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Newest first.
    pub posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    fetches_in_flight: usize,
    error: Option<String>,
}

impl State {
    fn position(&self, id: i64) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }
}

/// Cheaply clonable handle; clones share state.
#[derive(Clone)]
pub struct PostStore {
    api: Arc<dyn PostsApi>,
    state: Arc<Mutex<State>>,
}

impl PostStore {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.state.lock().posts.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().fetches_in_flight > 0
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock();
        StoreSnapshot {
            posts: state.posts.clone(),
            loading: state.fetches_in_flight > 0,
            error: state.error.clone(),
        }
    }

    /// Replace the local posts with the caller's posts from the server.
    ///
    /// `loading` is raised for the duration and lowered on every exit path,
    /// including the future being dropped.
    pub async fn fetch(&self) -> Result<(), ApiError> {
        let _loading = LoadingGuard::begin(&self.state);

        match self.api.list_posts().await {
            Ok(posts) => {
                let posts: Vec<Post> = posts.into_iter().map(Post::from).collect();
                tracing::debug!(count = posts.len(), "Fetched posts");
                self.state.lock().posts = posts;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch posts");
                self.state.lock().error = Some(FETCH_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Create a post optimistically.
    ///
    /// The unconfirmed post is prepended before this method returns; the
    /// returned future sends the request and reconciles. Dropping the future
    /// before it completes removes the unconfirmed post.
    pub fn create(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> BoxFuture<'static, Result<Post, CreateFailure>> {
        let request = CreatePostRequest {
            title: title.into(),
            body: body.into(),
        };

        let temp_id = next_temp_id();
        let optimistic = Post::optimistic(temp_id, request.title.clone(), request.body.clone());
        self.state.lock().posts.insert(0, optimistic);
        tracing::debug!(temp_id, "Inserted optimistic post");

        // Built outside the async block so an unpolled future still owns it.
        let pending = PendingCreate {
            state: self.state.clone(),
            temp_id,
            settled: false,
        };
        let api = self.api.clone();
        async move {
            let result = api.create_post(&request).await;
            pending.settle(result)
        }
        .boxed()
    }

    /// Delete a confirmed post on the server, then locally.
    ///
    /// Not optimistic: the local entry stays until the server agrees.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        match self.api.delete_post(id).await {
            Ok(_) => {
                let mut state = self.state.lock();
                if let Some(index) = state.position(id) {
                    state.posts.remove(index);
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(post_id = id, error = %e, "Failed to delete post");
                self.state.lock().error = Some(DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }
}

struct LoadingGuard<'a> {
    state: &'a Mutex<State>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a Mutex<State>) -> Self {
        let mut guard = state.lock();
        guard.fetches_in_flight += 1;
        guard.error = None;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().fetches_in_flight -= 1;
    }
}

/// Owns one optimistic entry until its request settles.
struct PendingCreate {
    state: Arc<Mutex<State>>,
    temp_id: i64,
    settled: bool,
}

impl PendingCreate {
    fn settle(
        mut self,
        result: Result<CreatePostResponse, ApiError>,
    ) -> Result<Post, CreateFailure> {
        self.settled = true;
        let mut state = self.state.lock();
        let position = state.position(self.temp_id);

        match result {
            Ok(response) => {
                let post = Post::from(response.post);
                // Gone if a fetch replaced the list meanwhile; the fetched
                // list is then the truth.
                if let Some(index) = position {
                    state.posts[index] = post.clone();
                }
                tracing::debug!(temp_id = self.temp_id, post_id = post.id, "Confirmed post");
                Ok(post)
            }
            Err(cause) => {
                if let Some(index) = position {
                    state.posts.remove(index);
                }
                state.error = Some(CREATE_FAILED.to_string());
                tracing::warn!(temp_id = self.temp_id, error = %cause, "Rolled back post");
                Err(CreateFailure::new(cause))
            }
        }
    }
}

impl Drop for PendingCreate {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.state.lock();
        if let Some(index) = state.position(self.temp_id) {
            state.posts.remove(index);
            tracing::debug!(temp_id = self.temp_id, "Abandoned optimistic post");
        }
    }
}
