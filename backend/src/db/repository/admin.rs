//! Admin account storage.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Admin, DocumentId};

/// Repository trait for admin accounts.
///
/// Emails are expected in normalized form (see [`crate::models::normalize_email`]).
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look an admin up by email.
    ///
    /// # Returns
    /// * `Ok(None)` - If no admin uses that email
    async fn find_admin_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>>;

    /// Fetch an admin by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the admin does not exist
    async fn get_admin(&self, id: &DocumentId) -> RepositoryResult<Admin>;

    /// Store a new admin.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - If the email or id is already taken
    async fn insert_admin(&self, admin: Admin) -> RepositoryResult<Admin>;

    /// Overwrite an existing admin's email, password hash and `updated_at`.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the admin does not exist
    /// * `Err(RepositoryError::Conflict)` - If the new email belongs to another admin
    async fn update_admin(&self, admin: Admin) -> RepositoryResult<Admin>;

    /// Number of stored admins.
    async fn count_admins(&self) -> RepositoryResult<usize>;
}
