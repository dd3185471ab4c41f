//! Concurrent and service-level behaviour of the in-memory repository.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use school_portal::db::repositories::LocalRepository;
use school_portal::db::repository::{DocumentRepository, RepositoryError};
use school_portal::db::services;
use school_portal::models::{Collection, Contact, DocumentId, Event};

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_concurrent_inserts_are_all_kept() {
    let repo = Arc::new(LocalRepository::new());
    let mut handles = Vec::new();
    for i in 0..32 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            services::create_record::<Contact, _>(
                repo.as_ref(),
                fields(json!({
                    "name": format!("Visitor {i}"),
                    "email": format!("v{i}@example.com"),
                    "message": "Hello",
                })),
            )
            .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.count_documents(Collection::Contacts).await.unwrap(), 32);
    let listed = services::list_records::<Contact, _>(repo.as_ref()).await.unwrap();
    let mut ids: Vec<_> = listed.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}

#[tokio::test]
async fn test_unhealthy_store_fails_operations() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    assert!(!services::health_check(&repo).await.unwrap());
    let err = services::list_records::<Event, _>(&repo).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
    assert!(err.to_string().starts_with("Connection error"));
}

#[tokio::test]
async fn test_collections_do_not_leak() {
    let repo = LocalRepository::new();
    let event = services::create_record::<Event, _>(&repo, fields(json!({"title": "Fair"})))
        .await
        .unwrap();

    let err = services::get_record::<Contact, _>(&repo, &event.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "Contact not found");

    let missing = DocumentId::new("missing");
    assert!(services::delete_record::<Event, _>(&repo, &missing)
        .await
        .unwrap_err()
        .is_not_found());
}
