//! Request guards for admin-only routes.
//!
//! Handlers take a guard as their first extractor. [`AdminSession`] rejects
//! the request with 401 unless it carries a valid session token; [`Public`]
//! always succeeds. Generic resource handlers are parameterized by the guard
//! so the router decides access per route.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use super::cookies::ADMIN_TOKEN_COOKIE;
use super::error::AppError;
use super::state::AppState;
use crate::auth::Claims;
use crate::models::DocumentId;

/// An authenticated admin, decoded from the session token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: Claims,
}

impl AdminSession {
    pub fn admin_id(&self) -> DocumentId {
        self.claims.admin_id()
    }
}

/// Session token from the `adminToken` cookie, else from a bearer header.
fn session_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(ADMIN_TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or_else(AppError::unauthorized)?;
        match state.tokens.verify(&token) {
            Ok(claims) => Ok(Self { claims }),
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                Err(AppError::unauthorized())
            }
        }
    }
}

/// Guard for routes open to everyone.
#[derive(Debug, Clone, Copy)]
pub struct Public;

impl<S: Send + Sync> FromRequestParts<S> for Public {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: (&str, &str)) -> Parts {
        let (parts, _) = Request::builder()
            .header(header.0, header.1)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_token_from_cookie() {
        let p = parts(("cookie", "adminAuthed=true; adminToken=abc"));
        assert_eq!(session_token(&p).as_deref(), Some("abc"));
    }

    #[test]
    fn test_token_from_bearer() {
        let p = parts(("authorization", "Bearer xyz"));
        assert_eq!(session_token(&p).as_deref(), Some("xyz"));

        let p = parts(("authorization", "Basic xyz"));
        assert_eq!(session_token(&p), None);
    }

    #[test]
    fn test_empty_cookie_falls_through() {
        let p = parts(("cookie", "adminToken="));
        assert_eq!(session_token(&p), None);
    }
}
