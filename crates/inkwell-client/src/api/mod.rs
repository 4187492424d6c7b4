//! The REST boundary consumed by the store and the auth session.

mod http;

use async_trait::async_trait;

use inkwell_shared::dto::{
    CreatePostRequest, CreatePostResponse, MessageResponse, PostResponse, TokenResponse,
};

use crate::error::ApiError;

pub use http::{HttpApi, decode_response};

/// Backend operations. Post operations use the bearer installed with
/// [`PostsApi::set_bearer`].
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// `POST /api/auth/token`
    async fn request_token(&self, device_id: &str) -> Result<TokenResponse, ApiError>;

    /// Install or clear the bearer token sent with post requests.
    fn set_bearer(&self, token: Option<String>);

    /// `GET /api/posts`
    async fn list_posts(&self) -> Result<Vec<PostResponse>, ApiError>;

    /// `POST /api/posts`
    async fn create_post(&self, request: &CreatePostRequest)
    -> Result<CreatePostResponse, ApiError>;

    /// `DELETE /api/posts/{id}`
    async fn delete_post(&self, id: i64) -> Result<MessageResponse, ApiError>;
}
