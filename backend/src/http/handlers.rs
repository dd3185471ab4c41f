//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Generic collection CRUD lives in
//! [`super::resources`].

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Map, Value};

use super::dto::{
    AdminSummary, ApiResponse, HealthResponse, JsonBody, JsonBodyOrDefault, LoginData,
    LoginRequest, UpdateCredentialsRequest,
};
use super::error::AppError;
use super::session::{AdminSession, Public};
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{AdminProfile, Event, HomeStats, Record};
use crate::services::admin::{self as admin_service, AdminError, CredentialsUpdate};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<ApiResponse<T>>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Liveness probe. Does not touch the database.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// =============================================================================
// Admin
// =============================================================================

/// POST /api/admin/login
///
/// Verify credentials, then set the session cookies and echo the token.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBodyOrDefault(request): JsonBodyOrDefault<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<LoginData>>), AppError> {
    let outcome = admin_service::login(
        state.repository.as_ref(),
        &state.hasher,
        &state.tokens,
        request.email.as_deref(),
        request.password.as_deref(),
    )
    .await?;

    let [token_cookie, flag_cookie] = state.cookies.session_cookies(outcome.token.clone());
    let jar = jar.add(token_cookie).add(flag_cookie);

    let data = LoginData {
        token: outcome.token,
        admin: AdminSummary {
            id: outcome.admin.id,
            email: outcome.admin.email,
        },
    };
    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::ok_with_message("Login successful", data)),
    ))
}

/// POST /api/admin/logout
///
/// Always succeeds; expires both session cookies.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    let [token_cookie, flag_cookie] = state.cookies.removal_cookies();
    // Removal cookies are added, not `jar.remove`d, so they are sent even when
    // the request carried no cookies.
    let jar = jar.add(token_cookie).add(flag_cookie);
    (jar, Json(ApiResponse::message("Logged out successfully")))
}

/// PUT /api/admin/update-credentials
pub async fn update_credentials(
    session: AdminSession,
    State(state): State<AppState>,
    JsonBodyOrDefault(request): JsonBodyOrDefault<UpdateCredentialsRequest>,
) -> HandlerResult<AdminProfile> {
    let update = CredentialsUpdate {
        email: request.email,
        password: request.password,
        current_password: request.current_password,
    };
    let profile = admin_service::update_credentials(
        state.repository.as_ref(),
        &state.hasher,
        &session.admin_id(),
        update,
    )
    .await
    .map_err(|e| match e {
        // A session for a deleted admin is a bad request here, not a 404.
        AdminError::NotFound => AppError::BadRequest(e.to_string()),
        other => other.into(),
    })?;

    Ok(Json(ApiResponse::ok_with_message(
        "Credentials updated successfully",
        profile,
    )))
}

/// GET /api/admin/profile
pub async fn get_profile(
    session: AdminSession,
    State(state): State<AppState>,
) -> HandlerResult<AdminProfile> {
    let profile = admin_service::get_profile(state.repository.as_ref(), &session.admin_id()).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

// =============================================================================
// Events
// =============================================================================

/// GET /api/events/highlighted
pub async fn list_highlighted_events(
    _guard: Public,
    State(state): State<AppState>,
) -> HandlerResult<Vec<Record<Event>>> {
    let events = db_services::list_highlighted_events(state.repository.as_ref()).await?;
    Ok(Json(ApiResponse::ok(events)))
}

// =============================================================================
// Home Stats
// =============================================================================

/// GET /api/home-stats
pub async fn get_home_stats(
    _guard: Public,
    State(state): State<AppState>,
) -> HandlerResult<HomeStats> {
    let stats = db_services::get_home_stats(state.repository.as_ref()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// PUT /api/home-stats
pub async fn update_home_stats(
    _admin: AdminSession,
    State(state): State<AppState>,
    JsonBody(patch): JsonBody<Map<String, Value>>,
) -> HandlerResult<HomeStats> {
    let stats = db_services::update_home_stats(state.repository.as_ref(), patch).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Home stats updated successfully",
        stats,
    )))
}
