//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::resources::{create, delete, get_one, list, update};
use super::session::{AdminSession, Public};
use super::state::AppState;
use crate::models::{
    Activity, Admission, Contact, Event, Job, JobApplication, Parent, Resource, User,
};

/// Request bodies larger than this are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Published content: anyone reads, admins write.
fn content_routes<T: Resource>(path: &str) -> Router<AppState> {
    Router::new()
        .route(
            path,
            get(list::<T, Public>).post(create::<T, AdminSession>),
        )
        .route(
            &format!("{path}/{{id}}"),
            get(get_one::<T, Public>)
                .put(update::<T, AdminSession>)
                .delete(delete::<T, AdminSession>),
        )
}

/// Visitor submissions: anyone creates, admins read and manage.
fn submission_routes<T: Resource>(path: &str) -> Router<AppState> {
    Router::new()
        .route(
            path,
            get(list::<T, AdminSession>).post(create::<T, Public>),
        )
        .route(
            &format!("{path}/{{id}}"),
            get(get_one::<T, AdminSession>)
                .put(update::<T, AdminSession>)
                .delete(delete::<T, AdminSession>),
        )
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Credentialed CORS: the request origin is echoed back.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let admin = Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/update-credentials", put(handlers::update_credentials))
        .route("/profile", get(handlers::get_profile));

    // Static segment wins over `/events/{id}`.
    let events_extra =
        Router::new().route("/events/highlighted", get(handlers::list_highlighted_events));

    let api = Router::new()
        .nest("/admin", admin)
        .merge(events_extra)
        .merge(content_routes::<Event>("/events"))
        .merge(content_routes::<Job>("/jobs"))
        .merge(content_routes::<Activity>("/activities"))
        .merge(submission_routes::<User>("/users"))
        .merge(submission_routes::<JobApplication>("/job-applications"))
        .merge(submission_routes::<Admission>("/admissions"))
        .merge(submission_routes::<Parent>("/parents"))
        .merge(submission_routes::<Contact>("/contacts"))
        .route(
            "/home-stats",
            get(handlers::get_home_stats).put(handlers::update_home_stats),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
