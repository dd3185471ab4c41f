//! Repository trait definitions for database operations.
//!
//! Storage is split into focused traits so each backend implementation stays
//! readable and testable:
//!
//! - [`error`]: Error types for repository operations
//! - [`document`]: Generic document CRUD over named collections
//! - [`admin`]: Admin account storage (kept apart so password hashes never
//!   flow through the generic document paths)
//!
//! # Convenience Trait Bound
//!
//! For code that needs every capability, use [`FullRepository`]:
//!
//! ```ignore
//! async fn seed<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     repo.insert_admin(admin).await?;
//!     repo.insert_document(Collection::Events, document).await?;
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod document;
pub mod error;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use admin::AdminRepository;
pub use document::DocumentRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both repository traits.
pub trait FullRepository: DocumentRepository + AdminRepository {}

impl<T> FullRepository for T where T: DocumentRepository + AdminRepository {}
