//! Router fixtures and request helpers.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use school_portal::auth::{PasswordHasher, TokenIssuer};
use school_portal::db::repositories::LocalRepository;
use school_portal::db::repository::FullRepository;
use school_portal::http::cookies::CookiePolicy;
use school_portal::http::{create_router, AppState};
use school_portal::services::admin::ensure_default_admin;

pub const ADMIN_EMAIL: &str = "admin@school.local";
pub const ADMIN_PASSWORD: &str = "admin@123";
pub const JWT_SECRET: &[u8] = b"integration-test-secret";

/// Application state over `repo` with the cheapest bcrypt cost.
pub fn test_state(repo: LocalRepository) -> AppState {
    AppState::new(
        Arc::new(repo) as Arc<dyn FullRepository>,
        TokenIssuer::new(JWT_SECRET, Duration::days(7)),
        PasswordHasher::new(4),
        CookiePolicy::new(false, Duration::days(7)),
    )
}

/// Router over a fresh store holding the default admin.
///
/// The returned repository shares storage with the router.
pub async fn seeded_app() -> (Router, LocalRepository) {
    let repo = LocalRepository::new();
    let state = test_state(repo.clone());
    ensure_default_admin(
        state.repository.as_ref(),
        &state.hasher,
        ADMIN_EMAIL,
        ADMIN_PASSWORD,
    )
    .await
    .unwrap();
    (create_router(state), repo)
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// All `Set-Cookie` header values.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// The `Set-Cookie` value for `name`, if any.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies().into_iter().find(|c| c.starts_with(&prefix))
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

/// Build a request, optionally with a JSON body and a session cookie.
pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    send(app, request(Method::GET, uri, None, cookie)).await
}

pub async fn post(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
    send(app, request(Method::POST, uri, Some(body), cookie)).await
}

pub async fn put(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
    send(app, request(Method::PUT, uri, Some(body), cookie)).await
}

pub async fn delete(app: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    send(app, request(Method::DELETE, uri, None, cookie)).await
}

/// Log in as `email`/`password` and return a `Cookie` header value carrying
/// the session.
pub async fn login_as(app: &Router, email: &str, password: &str) -> String {
    let response = post(
        app,
        "/api/admin/login",
        serde_json::json!({"email": email, "password": password}),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
    let token = response.body["data"]["token"].as_str().unwrap();
    format!("adminToken={token}")
}

/// Session cookie for the default admin.
pub async fn admin_cookie(app: &Router) -> String {
    login_as(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}
