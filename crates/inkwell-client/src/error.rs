//! Errors surfaced by the HTTP client adapter.
//!
//! `NotFound` and `Unauthorized` get dedicated variants because callers act
//! on them (drop a stale entry, request a new token). Field-level validation
//! failures keep the server's `errors` map so every message can be shown.

use thiserror::Error;

use inkwell_core::domain::ValidationErrors;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout...).
    #[error("network error: {0}")]
    Transport(String),

    /// 422 with a field-keyed `errors` body.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// 401/403: missing, expired or rejected bearer token.
    #[error("not authenticated")]
    Unauthorized,

    /// 404: the resource does not exist or is not the caller's.
    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx body that did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The field errors carried by a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
