//! Scriptable in-process stand-in for the REST API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use inkwell_core::domain::NewPost;
use inkwell_shared::dto::{
    CreatePostRequest, CreatePostResponse, GuestUserResponse, MessageResponse, PostResponse,
    TokenResponse,
};

use crate::api::PostsApi;
use crate::error::ApiError;

pub(crate) const USER_ID: i64 = 1;

#[derive(Default)]
pub(crate) struct FakeApi {
    /// Newest first, like the real listing.
    server: Mutex<Vec<PostResponse>>,
    next_id: AtomicI64,
    tokens_issued: AtomicI64,
    pub fail_list: AtomicBool,
    pub fail_token: AtomicBool,
    pub fail_create: Mutex<Option<ApiError>>,
    pub bearer: Mutex<Option<String>>,
    pub device_ids: Mutex<Vec<String>>,
    create_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    list_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FakeApi {
    /// Hold the create request for `title` until the sender fires or drops.
    pub fn gate_create(&self, title: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.create_gates.lock().insert(title.to_string(), rx);
        tx
    }

    /// Hold the next listing until the sender fires or drops.
    pub fn gate_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.list_gate.lock() = Some(rx);
        tx
    }

    pub fn seed(&self, title: &str, content: &str) -> PostResponse {
        let now = Utc::now();
        let post = PostResponse {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: USER_ID,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.server.lock().insert(0, post.clone());
        post
    }

    pub fn server_len(&self) -> usize {
        self.server.lock().len()
    }
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn request_token(&self, device_id: &str) -> Result<TokenResponse, ApiError> {
        self.device_ids.lock().push(device_id.to_string());
        if self.fail_token.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".to_string()));
        }

        let n = self.tokens_issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TokenResponse {
            token: format!("token-{n}"),
            user: GuestUserResponse {
                id: USER_ID,
                name: "Guest".to_string(),
            },
        })
    }

    fn set_bearer(&self, token: Option<String>) {
        *self.bearer.lock() = token;
    }

    async fn list_posts(&self) -> Result<Vec<PostResponse>, ApiError> {
        let gate = self.list_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Http {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(self.server.lock().clone())
    }

    async fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> Result<CreatePostResponse, ApiError> {
        let gate = self.create_gates.lock().remove(&request.title);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(err) = self.fail_create.lock().clone() {
            return Err(err);
        }

        let new_post = NewPost::new(&request.title, &request.body);
        new_post.validate().map_err(ApiError::Validation)?;

        Ok(CreatePostResponse {
            message: "Post created successfully".to_string(),
            post: self.seed(&new_post.title, &new_post.body),
        })
    }

    async fn delete_post(&self, id: i64) -> Result<MessageResponse, ApiError> {
        let mut server = self.server.lock();
        let index = server
            .iter()
            .position(|p| p.id == id)
            .ok_or(ApiError::NotFound)?;
        server.remove(index);
        Ok(MessageResponse {
            message: "Post deleted successfully".to_string(),
        })
    }
}
