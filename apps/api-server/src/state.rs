//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use inkwell_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    /// Which repository backend is live, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match inkwell_infra::database::connect(db_config).await {
                Ok(conn) => Self {
                    users: Arc::new(inkwell_infra::PostgresUserRepository::new(conn.clone())),
                    posts: Arc::new(inkwell_infra::PostgresPostRepository::new(conn)),
                    tokens,
                    passwords,
                    storage: "postgres",
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(tokens, passwords)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(tokens, passwords)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::in_memory(tokens, passwords)
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }

    /// State backed by in-memory repositories.
    pub fn in_memory(tokens: Arc<dyn TokenService>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            tokens,
            passwords,
            storage: "memory",
        }
    }
}
