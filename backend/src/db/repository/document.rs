//! Generic document CRUD.
//!
//! Every content and submission collection goes through this trait. Backends
//! store documents opaquely; typing and validation live in the service layer.

use async_trait::async_trait;
use serde_json::Value;

use super::error::RepositoryResult;
use crate::models::{Collection, Document, DocumentId};

/// Repository trait for document collections.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Documents ====================

    /// Store a new document.
    ///
    /// # Returns
    /// * `Ok(Document)` - The stored document
    /// * `Err(RepositoryError::Conflict)` - If the id is already used in the collection
    async fn insert_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> RepositoryResult<Document>;

    /// Fetch one document by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such document exists
    async fn get_document(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> RepositoryResult<Document>;

    /// List every document in a collection, newest first.
    async fn list_documents(&self, collection: Collection) -> RepositoryResult<Vec<Document>>;

    /// List documents whose top-level `field` equals `value`, newest first.
    async fn find_documents(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> RepositoryResult<Vec<Document>>;

    /// Overwrite an existing document (matched by id).
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such document exists
    async fn replace_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> RepositoryResult<Document>;

    /// Delete a document by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such document exists
    async fn delete_document(&self, collection: Collection, id: &DocumentId)
        -> RepositoryResult<()>;

    /// Number of documents in a collection.
    async fn count_documents(&self, collection: Collection) -> RepositoryResult<usize>;
}
