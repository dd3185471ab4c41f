//! In-memory local repository implementation.
//!
//! Suitable for unit testing and local development. All data lives in memory
//! behind a single `RwLock`, giving fast, deterministic and isolated
//! execution. Collections keep insertion order, so "newest first" is simply
//! reverse order.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{Admin, Collection, Document, DocumentId};

/// In-memory local repository.
///
/// # Example
/// ```
/// use school_portal::db::repositories::LocalRepository;
/// use school_portal::db::repository::DocumentRepository;
/// use school_portal::models::{Collection, Document};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     repo.insert_document(Collection::Events, Document::new(Default::default()))
///         .await
///         .unwrap();
///     assert_eq!(repo.document_count(Collection::Events), 1);
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    collections: HashMap<Collection, Vec<Document>>,
    admins: Vec<Admin>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            collections: HashMap::new(),
            admins: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of documents stored in a collection.
    pub fn document_count(&self, collection: Collection) -> usize {
        self.data
            .read()
            .collections
            .get(&collection)
            .map_or(0, Vec::len)
    }

    /// Get the number of stored admins.
    pub fn admin_count(&self) -> usize {
        self.data.read().admins.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn document_not_found(operation: &str, collection: Collection, id: &DocumentId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Document {} not found", id),
        ErrorContext::new(operation)
            .with_entity(collection.name())
            .with_entity_id(id),
    )
}

fn admin_not_found(operation: &str, id: &DocumentId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        "Admin not found",
        ErrorContext::new(operation).with_entity("admin").with_entity_id(id),
    )
}

fn email_taken(operation: &str, email: &str) -> RepositoryError {
    RepositoryError::conflict_with_context(
        format!("An admin with email {} already exists", email),
        ErrorContext::new(operation).with_entity("admin"),
    )
}

#[async_trait]
impl DocumentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> RepositoryResult<Document> {
        self.check_health()?;
        let mut data = self.data.write();
        let docs = data.collections.entry(collection).or_default();
        if docs.iter().any(|d| d.id == document.id) {
            return Err(RepositoryError::conflict_with_context(
                format!("Document {} already exists", document.id),
                ErrorContext::new("insert_document")
                    .with_entity(collection.name())
                    .with_entity_id(&document.id),
            ));
        }
        docs.push(document.clone());
        Ok(document)
    }

    async fn get_document(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> RepositoryResult<Document> {
        self.check_health()?;
        self.data
            .read()
            .collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| &d.id == id))
            .cloned()
            .ok_or_else(|| document_not_found("get_document", collection, id))
    }

    async fn list_documents(&self, collection: Collection) -> RepositoryResult<Vec<Document>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .collections
            .get(&collection)
            .map(|docs| docs.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_documents(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> RepositoryResult<Vec<Document>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .rev()
                    .filter(|d| d.field(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> RepositoryResult<Document> {
        self.check_health()?;
        let mut data = self.data.write();
        let slot = data
            .collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == document.id))
            .ok_or_else(|| document_not_found("replace_document", collection, &document.id))?;
        *slot = document.clone();
        Ok(document)
    }

    async fn delete_document(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        let docs = data
            .collections
            .get_mut(&collection)
            .ok_or_else(|| document_not_found("delete_document", collection, id))?;
        let position = docs
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| document_not_found("delete_document", collection, id))?;
        docs.remove(position);
        Ok(())
    }

    async fn count_documents(&self, collection: Collection) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(self.document_count(collection))
    }
}

#[async_trait]
impl AdminRepository for LocalRepository {
    async fn find_admin_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .admins
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn get_admin(&self, id: &DocumentId) -> RepositoryResult<Admin> {
        self.check_health()?;
        self.data
            .read()
            .admins
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(|| admin_not_found("get_admin", id))
    }

    async fn insert_admin(&self, admin: Admin) -> RepositoryResult<Admin> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.admins.iter().any(|a| a.email == admin.email || a.id == admin.id) {
            return Err(email_taken("insert_admin", &admin.email));
        }
        data.admins.push(admin.clone());
        Ok(admin)
    }

    async fn update_admin(&self, admin: Admin) -> RepositoryResult<Admin> {
        self.check_health()?;
        let mut data = self.data.write();
        if data
            .admins
            .iter()
            .any(|a| a.email == admin.email && a.id != admin.id)
        {
            return Err(email_taken("update_admin", &admin.email));
        }
        let slot = data
            .admins
            .iter_mut()
            .find(|a| a.id == admin.id)
            .ok_or_else(|| admin_not_found("update_admin", &admin.id))?;
        *slot = admin.clone();
        Ok(admin)
    }

    async fn count_admins(&self) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(self.admin_count())
    }
}
