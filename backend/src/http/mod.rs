//! HTTP server module for the school portal backend.
//!
//! This module provides an axum-based HTTP server that exposes the service
//! layer and repository as a JSON REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing, session guards, cookies               │
//! │  - JSON envelope, CORS, compression, error handling       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db::services, services::admin)            │
//! │  - Validation, merge updates, login and credentials       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod cookies;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod resources;
pub mod router;
pub mod session;
pub mod state;

pub use router::create_router;
pub use state::AppState;
