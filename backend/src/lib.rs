//! # School Portal Backend
//!
//! REST backend for a school website: public content (events, jobs,
//! activities, home page counters), visitor submissions (admissions, job
//! applications, contact and parent enquiries, user sign-ups) and a
//! cookie-authenticated admin account that manages them.
//!
//! ## Architecture
//!
//! - [`models`]: Entity types, the generic [`models::Document`] and field validation
//! - [`db`]: Repository pattern (in-memory and Postgres backends) and the document service layer
//! - [`auth`]: Password hashing and session tokens
//! - [`services`]: Admin account workflows
//! - [`config`]: Environment-driven server configuration
//! - [`http`]: Axum router, handlers, session guards and cookies

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
