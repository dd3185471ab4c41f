//! High-level database service layer.
//!
//! Repository-agnostic operations that work with any implementation of the
//! repository traits. This is where untyped documents become typed records:
//! incoming field maps are parsed and validated against the entity type
//! before they reach storage, and stored documents are parsed back on the way
//! out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers (http/)                                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                             │
//! │  - Field validation per entity                           │
//! │  - Merge-on-update semantics                             │
//! │  - Singleton documents (home stats)                      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//! ┌───▼──────────────┐     ┌──────────▼──────────────┐
//! │ Postgres (JSONB) │     │ Local Repository        │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use school_portal::db::{services, repositories::LocalRepository};
//! use school_portal::models::Event;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let events = services::list_records::<Event, _>(&repo).await?;
//!     println!("Found {} events", events.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info};
use serde_json::{Map, Value};

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{
    Collection, Document, DocumentId, Event, HomeStats, Record, Resource, ValidationError,
};

/// Fixed id of the home stats singleton document.
pub const HOME_STATS_ID: &str = "home";

// ==================== Health & Connection ====================

/// Check if the database connection is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Generic Records ====================

fn validation_failed<T: Resource>(operation: &str, err: ValidationError) -> RepositoryError {
    RepositoryError::ValidationError {
        message: err.to_string(),
        context: ErrorContext::new(operation).with_entity(T::COLLECTION.name()),
    }
}

fn to_records<T: Resource>(documents: Vec<Document>) -> RepositoryResult<Vec<Record<T>>> {
    documents
        .into_iter()
        .map(|d| Record::from_document(d).map_err(RepositoryError::from))
        .collect()
}

/// List every record of type `T`, newest first.
pub async fn list_records<T: Resource, R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Record<T>>> {
    let documents = repo.list_documents(T::COLLECTION).await?;
    to_records(documents)
}

/// Fetch one record of type `T`.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` - If no such record exists
pub async fn get_record<T: Resource, R: FullRepository + ?Sized>(
    repo: &R,
    id: &DocumentId,
) -> RepositoryResult<Record<T>> {
    let document = repo
        .get_document(T::COLLECTION, id)
        .await
        .map_err(|e| relabel_not_found::<T>(e, id))?;
    Ok(Record::from_document(document)?)
}

/// Validate and store a new record built from client-supplied fields.
///
/// Unknown fields are dropped and defaults filled in, so the stored document
/// always has the entity's canonical shape.
///
/// # Returns
/// * `Err(RepositoryError::ValidationError)` - If required fields are missing or malformed
pub async fn create_record<T: Resource, R: FullRepository + ?Sized>(
    repo: &R,
    fields: Map<String, Value>,
) -> RepositoryResult<Record<T>> {
    let entity = T::from_fields(fields).map_err(|e| validation_failed::<T>("create_record", e))?;
    let document = Document::new(entity.to_fields()?);
    let stored = repo.insert_document(T::COLLECTION, document).await?;
    info!("Created {} {}", T::COLLECTION, stored.id);
    Ok(Record::from_document(stored)?)
}

/// Merge `patch` into an existing record and revalidate the result.
///
/// Top-level fields in `patch` replace the stored ones; fields not mentioned
/// are kept.
pub async fn update_record<T: Resource, R: FullRepository + ?Sized>(
    repo: &R,
    id: &DocumentId,
    patch: Map<String, Value>,
) -> RepositoryResult<Record<T>> {
    let mut document = repo
        .get_document(T::COLLECTION, id)
        .await
        .map_err(|e| relabel_not_found::<T>(e, id))?;

    document.merge(patch);
    let entity = T::from_fields(document.fields.clone())
        .map_err(|e| validation_failed::<T>("update_record", e))?;
    document.replace_fields(entity.to_fields()?);

    let stored = repo
        .replace_document(T::COLLECTION, document)
        .await
        .map_err(|e| relabel_not_found::<T>(e, id))?;
    info!("Updated {} {}", T::COLLECTION, stored.id);
    Ok(Record::from_document(stored)?)
}

/// Delete a record of type `T`.
pub async fn delete_record<T: Resource, R: FullRepository + ?Sized>(
    repo: &R,
    id: &DocumentId,
) -> RepositoryResult<()> {
    repo.delete_document(T::COLLECTION, id)
        .await
        .map_err(|e| relabel_not_found::<T>(e, id))?;
    info!("Deleted {} {}", T::COLLECTION, id);
    Ok(())
}

/// Replace the storage-level "Document ... not found" with the entity label.
fn relabel_not_found<T: Resource>(err: RepositoryError, id: &DocumentId) -> RepositoryError {
    match err {
        RepositoryError::NotFound { context, .. } => RepositoryError::NotFound {
            message: format!("{} not found", T::LABEL),
            context: context.with_entity_id(id),
        },
        other => other,
    }
}

// ==================== Events ====================

/// Events flagged for the highlights strip, newest first.
pub async fn list_highlighted_events<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Record<Event>>> {
    let documents = repo
        .find_documents(Collection::Events, "highlighted", &Value::Bool(true))
        .await?;
    debug!("Found {} highlighted events", documents.len());
    to_records(documents)
}

// ==================== Home Stats ====================

/// Current home page counters; all zero until first set.
pub async fn get_home_stats<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<HomeStats> {
    match repo
        .get_document(Collection::HomeStats, &DocumentId::new(HOME_STATS_ID))
        .await
    {
        Ok(document) => Ok(Record::<HomeStats>::from_document(document)?.data),
        Err(e) if e.is_not_found() => Ok(HomeStats::default()),
        Err(e) => Err(e),
    }
}

/// Merge `patch` into the home page counters, creating them on first use.
pub async fn update_home_stats<R: FullRepository + ?Sized>(
    repo: &R,
    patch: Map<String, Value>,
) -> RepositoryResult<HomeStats> {
    let id = DocumentId::new(HOME_STATS_ID);
    let existing = match repo.get_document(Collection::HomeStats, &id).await {
        Ok(document) => Some(document),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e),
    };

    let stats = match existing {
        Some(mut document) => {
            document.merge(patch);
            let stats = HomeStats::from_fields(document.fields.clone())
                .map_err(|e| validation_failed::<HomeStats>("update_home_stats", e))?;
            document.replace_fields(stats.to_fields()?);
            repo.replace_document(Collection::HomeStats, document).await?;
            stats
        }
        None => {
            let stats = HomeStats::from_fields(patch)
                .map_err(|e| validation_failed::<HomeStats>("update_home_stats", e))?;
            let document = Document::with_id(id, stats.to_fields()?);
            repo.insert_document(Collection::HomeStats, document).await?;
            stats
        }
    };
    info!("Home stats updated");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::DocumentRepository;
    use crate::models::{Contact, Job};
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_normalizes_fields() {
        let repo = LocalRepository::new();
        let job = create_record::<Job, _>(&repo, map(json!({"title": "Librarian", "junk": 1})))
            .await
            .unwrap();
        assert!(job.data.is_active);

        let stored = repo.get_document(Collection::Jobs, &job.id).await.unwrap();
        assert_eq!(stored.fields["isActive"], true);
        assert!(!stored.fields.contains_key("junk"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid() {
        let repo = LocalRepository::new();
        let err = create_record::<Contact, _>(&repo, map(json!({"name": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(err.message(), "email is required");
        assert_eq!(repo.document_count(Collection::Contacts), 0);
    }

    #[tokio::test]
    async fn test_update_merges_and_revalidates() {
        let repo = LocalRepository::new();
        let created = create_record::<Event, _>(
            &repo,
            map(json!({"title": "Fair", "description": "Science"})),
        )
        .await
        .unwrap();

        let updated = update_record::<Event, _>(&repo, &created.id, map(json!({"highlighted": true})))
            .await
            .unwrap();
        assert_eq!(updated.data.title, "Fair");
        assert_eq!(updated.data.description.as_deref(), Some("Science"));
        assert!(updated.data.highlighted);
        assert_eq!(updated.created_at, created.created_at);

        let err = update_record::<Event, _>(&repo, &created.id, map(json!({"title": ""})))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));

        // The failed update left the stored record untouched.
        let current = get_record::<Event, _>(&repo, &created.id).await.unwrap();
        assert_eq!(current.data.title, "Fair");
    }

    #[tokio::test]
    async fn test_missing_record_uses_entity_label() {
        let repo = LocalRepository::new();
        let id = DocumentId::new("nope");
        let err = get_record::<Event, _>(&repo, &id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Event not found");

        let err = delete_record::<Job, _>(&repo, &id).await.unwrap_err();
        assert_eq!(err.message(), "Job not found");
    }

    #[tokio::test]
    async fn test_highlighted_events_only() {
        let repo = LocalRepository::new();
        create_record::<Event, _>(&repo, map(json!({"title": "Plain"})))
            .await
            .unwrap();
        create_record::<Event, _>(&repo, map(json!({"title": "Star", "highlighted": true})))
            .await
            .unwrap();

        let highlighted = list_highlighted_events(&repo).await.unwrap();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].data.title, "Star");
    }

    #[tokio::test]
    async fn test_home_stats_singleton() {
        let repo = LocalRepository::new();
        assert_eq!(get_home_stats(&repo).await.unwrap(), HomeStats::default());

        update_home_stats(&repo, map(json!({"students": 900}))).await.unwrap();
        let stats = update_home_stats(&repo, map(json!({"teachers": 60}))).await.unwrap();
        assert_eq!(stats.students, 900);
        assert_eq!(stats.teachers, 60);
        assert_eq!(repo.document_count(Collection::HomeStats), 1);
        assert_eq!(get_home_stats(&repo).await.unwrap(), stats);
    }
}
