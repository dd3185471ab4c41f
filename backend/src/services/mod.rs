//! Service layer for business logic and orchestration.
//!
//! Content CRUD lives in [`crate::db::services`]; this module holds the
//! admin account workflows that sit on top of the repository and the auth
//! primitives.

pub mod admin;

pub use admin::{AdminError, CredentialsUpdate, LoginOutcome};
