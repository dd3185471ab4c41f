//! Admin session cookies.
//!
//! Login sets two cookies: the HTTP-only session token and a script-readable
//! flag the frontend uses to decide whether to show admin UI. Logout removes
//! both with the same attributes they were set with.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie carrying the session token. HTTP-only.
pub const ADMIN_TOKEN_COOKIE: &str = "adminToken";
/// Cookie telling client-side code an admin is logged in. Always `"true"`.
pub const AUTH_FLAG_COOKIE: &str = "adminAuthed";

/// Attributes shared by both session cookies.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    /// Add the `Secure` attribute (production only)
    pub secure: bool,
    pub max_age: chrono::Duration,
}

impl CookiePolicy {
    pub fn new(secure: bool, max_age: chrono::Duration) -> Self {
        Self { secure, max_age }
    }

    /// The token cookie and the flag cookie for a fresh session.
    pub fn session_cookies(&self, token: String) -> [Cookie<'static>; 2] {
        let max_age = time::Duration::seconds(self.max_age.num_seconds());
        let mut cookies = [
            self.base(ADMIN_TOKEN_COOKIE, token, true),
            self.base(AUTH_FLAG_COOKIE, "true".to_string(), false),
        ];
        for cookie in &mut cookies {
            cookie.set_max_age(max_age);
        }
        cookies
    }

    /// Cookies that expire both session cookies in the browser.
    pub fn removal_cookies(&self) -> [Cookie<'static>; 2] {
        [ADMIN_TOKEN_COOKIE, AUTH_FLAG_COOKIE].map(|name| {
            let mut cookie = self.base(name, String::new(), name == ADMIN_TOKEN_COOKIE);
            cookie.make_removal();
            cookie
        })
    }

    fn base(&self, name: &'static str, value: String, http_only: bool) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(http_only)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}
