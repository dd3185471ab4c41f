//! Application state for the HTTP server.

use std::sync::Arc;

use super::cookies::CookiePolicy;
use crate::auth::{PasswordHasher, TokenIssuer};
use crate::config::AppConfig;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Session token signer
    pub tokens: Arc<TokenIssuer>,
    pub hasher: PasswordHasher,
    pub cookies: CookiePolicy,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        tokens: TokenIssuer,
        hasher: PasswordHasher,
        cookies: CookiePolicy,
    ) -> Self {
        Self {
            repository,
            tokens: Arc::new(tokens),
            hasher,
            cookies,
        }
    }

    /// Build the state described by `config` around `repository`.
    pub fn from_config(repository: Arc<dyn FullRepository>, config: &AppConfig) -> Self {
        Self::new(
            repository,
            TokenIssuer::new(config.jwt_secret.as_bytes(), config.session_ttl),
            PasswordHasher::new(config.bcrypt_cost),
            CookiePolicy::new(config.is_production(), config.session_ttl),
        )
    }
}
