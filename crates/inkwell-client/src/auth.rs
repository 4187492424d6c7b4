//! Guest authentication for a device.
//!
//! A device identifier is generated once and persisted. Exchanging it for a
//! token always yields the same guest account; the token is persisted too,
//! so later sessions reuse it without a round trip.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;

use inkwell_shared::dto::GuestUserResponse;

use crate::api::PostsApi;
use crate::error::ApiError;
use crate::storage::{KeyValueStore, StorageError};

pub const TOKEN_KEY: &str = "auth_token";
pub const DEVICE_ID_KEY: &str = "device_id";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user: Option<GuestUserResponse>,
    initialized: bool,
}

pub struct AuthSession {
    api: Arc<dyn PostsApi>,
    storage: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
}

impl AuthSession {
    pub fn new(api: Arc<dyn PostsApi>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            storage,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Reuse a persisted token, or request one.
    pub async fn init(&self) -> Result<(), SessionError> {
        if let Some(token) = self.storage.get(TOKEN_KEY)? {
            tracing::debug!("Reusing stored auth token");
            self.install(token, None);
            return Ok(());
        }
        self.request_token().await.map(|_| ())
    }

    /// Exchange the device id for a fresh token.
    ///
    /// The session counts as initialized afterwards whether or not this
    /// succeeds.
    pub async fn request_token(&self) -> Result<GuestUserResponse, SessionError> {
        let result = self.exchange().await;
        self.state.lock().initialized = true;

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Failed to obtain auth token");
        }
        result
    }

    async fn exchange(&self) -> Result<GuestUserResponse, SessionError> {
        let device_id = self.device_id()?;
        let response = self.api.request_token(&device_id).await?;
        self.storage.set(TOKEN_KEY, &response.token)?;

        tracing::info!(user_id = response.user.id, "Authenticated as guest");
        self.install(response.token, Some(response.user.clone()));
        Ok(response.user)
    }

    fn install(&self, token: String, user: Option<GuestUserResponse>) {
        self.api.set_bearer(Some(token.clone()));
        let mut state = self.state.lock();
        state.token = Some(token);
        state.user = user;
        state.initialized = true;
    }

    /// The persisted device id, generating and storing one on first use.
    pub fn device_id(&self) -> Result<String, StorageError> {
        if let Some(id) = self.storage.get(DEVICE_ID_KEY)? {
            return Ok(id);
        }

        let id = format!(
            "device_{}_{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        );
        self.storage.set(DEVICE_ID_KEY, &id)?;
        Ok(id)
    }

    /// Forget the token and user. The device id survives, so the next
    /// request maps back to the same guest.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.api.set_bearer(None);
        {
            let mut state = self.state.lock();
            state.token = None;
            state.user = None;
        }
        self.storage.remove(TOKEN_KEY)
    }

    pub fn token(&self) -> Option<String> {
        self.state.lock().token.clone()
    }

    /// Known only after a token request in this process.
    pub fn user(&self) -> Option<GuestUserResponse> {
        self.state.lock().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().token.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }
}
