//! reqwest-backed implementation of [`PostsApi`].

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};

use inkwell_core::domain::ValidationErrors;
use inkwell_shared::dto::{
    CreatePostRequest, CreatePostResponse, MessageResponse, PostResponse, TokenResponse,
};

use super::PostsApi;
use crate::error::ApiError;

const DEVICE_ID_HEADER: &str = "X-Device-Id";

/// HTTP client for the Inkwell API.
///
/// Timeouts are whatever the supplied `reqwest::Client` uses.
pub struct HttpApi {
    client: Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.header("Accept", "application/json").send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, "API response");
        decode_response(status, &body)
    }
}

#[derive(Deserialize)]
struct ValidationBody {
    errors: ValidationErrors,
}

/// Map a status code and body onto the expected payload or an [`ApiError`].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    match status {
        200..=299 => serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string())),
        401 | 403 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        422 => match serde_json::from_str::<ValidationBody>(body) {
            Ok(parsed) => Err(ApiError::Validation(parsed.errors)),
            Err(_) => Err(ApiError::Http {
                status,
                body: body.to_string(),
            }),
        },
        _ => Err(ApiError::Http {
            status,
            body: body.to_string(),
        }),
    }
}

#[async_trait]
impl PostsApi for HttpApi {
    async fn request_token(&self, device_id: &str) -> Result<TokenResponse, ApiError> {
        let builder = self
            .client
            .post(self.url("/api/auth/token"))
            .header(DEVICE_ID_HEADER, device_id)
            .json(&serde_json::json!({}));
        self.send(builder).await
    }

    fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write() = token;
    }

    async fn list_posts(&self) -> Result<Vec<PostResponse>, ApiError> {
        let builder = self.authorized(self.client.get(self.url("/api/posts")));
        self.send(builder).await
    }

    async fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> Result<CreatePostResponse, ApiError> {
        let builder = self.authorized(self.client.post(self.url("/api/posts")).json(request));
        self.send(builder).await
    }

    async fn delete_post(&self, id: i64) -> Result<MessageResponse, ApiError> {
        let builder = self.authorized(self.client.delete(self.url(&format!("/api/posts/{id}"))));
        self.send(builder).await
    }
}
