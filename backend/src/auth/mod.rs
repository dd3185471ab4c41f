//! Admin authentication primitives.
//!
//! - [`password`]: bcrypt hashing and verification, off the async runtime
//! - [`jwt`]: signed session tokens
//!
//! Both are transport-agnostic; cookies and request extraction live in the
//! HTTP layer.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenIssuer};
pub use password::PasswordHasher;

use thiserror::Error;

/// Failures inside the authentication primitives.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Session lifetime is out of range")]
    LifetimeOutOfRange,

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
