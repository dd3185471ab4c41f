//! Admin accounts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::DocumentId;

/// A stored admin account. Never serialized directly: use [`AdminProfile`].
#[derive(Clone, PartialEq)]
pub struct Admin {
    pub id: DocumentId,
    /// Lower-cased, trimmed email address; unique across admins.
    pub email: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::generate(),
            email: normalize_email(&email.into()),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> AdminProfile {
        AdminProfile::from(self)
    }
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Public view of an admin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.clone(),
            email: admin.email.clone(),
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

/// Canonical form used for storing and looking up admin emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
