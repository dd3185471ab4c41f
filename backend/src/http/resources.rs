//! Generic CRUD handlers shared by every document collection.
//!
//! Handlers are generic over the entity type `T` and an access guard `G`
//! ([`super::session::Public`] or [`super::session::AdminSession`]), so one
//! set of functions serves all collections:
//!
//! ```ignore
//! .route("/events", get(list::<Event, Public>).post(create::<Event, AdminSession>))
//! ```

use axum::{
    extract::{FromRequestParts, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use super::dto::{ApiResponse, JsonBody};
use super::error::AppError;
use super::handlers::HandlerResult;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{DocumentId, Record, Resource};

/// GET /api/<resource>
pub async fn list<T, G>(_guard: G, State(state): State<AppState>) -> HandlerResult<Vec<Record<T>>>
where
    T: Resource,
    G: FromRequestParts<AppState> + Send + 'static,
{
    let records = db_services::list_records::<T, _>(state.repository.as_ref()).await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// GET /api/<resource>/{id}
pub async fn get_one<T, G>(
    _guard: G,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Record<T>>
where
    T: Resource,
    G: FromRequestParts<AppState> + Send + 'static,
{
    let record = db_services::get_record::<T, _>(state.repository.as_ref(), &DocumentId::new(id))
        .await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/<resource>
pub async fn create<T, G>(
    _guard: G,
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<Map<String, Value>>,
) -> Result<(StatusCode, Json<ApiResponse<Record<T>>>), AppError>
where
    T: Resource,
    G: FromRequestParts<AppState> + Send + 'static,
{
    let record = db_services::create_record::<T, _>(state.repository.as_ref(), fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            format!("{} created successfully", T::LABEL),
            record,
        )),
    ))
}

/// PUT /api/<resource>/{id}
pub async fn update<T, G>(
    _guard: G,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<Map<String, Value>>,
) -> HandlerResult<Record<T>>
where
    T: Resource,
    G: FromRequestParts<AppState> + Send + 'static,
{
    let record =
        db_services::update_record::<T, _>(state.repository.as_ref(), &DocumentId::new(id), patch)
            .await?;
    Ok(Json(ApiResponse::ok_with_message(
        format!("{} updated successfully", T::LABEL),
        record,
    )))
}

/// DELETE /api/<resource>/{id}
pub async fn delete<T, G>(
    _guard: G,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<()>
where
    T: Resource,
    G: FromRequestParts<AppState> + Send + 'static,
{
    db_services::delete_record::<T, _>(state.repository.as_ref(), &DocumentId::new(id)).await?;
    Ok(Json(ApiResponse::message(format!(
        "{} deleted successfully",
        T::LABEL
    ))))
}
