//! Client for the Inkwell API.
//!
//! - [`store::PostStore`]: the caller's posts, with optimistic creation
//! - [`auth::AuthSession`]: device-bound guest authentication
//! - [`api::HttpApi`]: the reqwest transport behind both
//! - [`storage`]: key-value persistence for the session

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::{HttpApi, PostsApi};
pub use auth::{AuthSession, SessionError};
pub use error::ApiError;
pub use model::Post;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CreateFailure, PostStore, StoreSnapshot};
