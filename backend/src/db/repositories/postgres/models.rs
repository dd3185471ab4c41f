use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use super::schema::{admins, documents};
use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::{Admin, Document, DocumentId};

#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // seq only drives ordering
pub struct DocumentRow {
    pub collection: String,
    pub id: String,
    pub seq: i64,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentRow {
    pub fn into_document(self) -> RepositoryResult<Document> {
        let fields = match self.body {
            Value::Object(map) => map,
            other => {
                return Err(RepositoryError::internal(format!(
                    "Document {} body is not an object: {}",
                    self.id, other
                )))
            }
        };
        Ok(Document {
            id: DocumentId(self.id),
            created_at: self.created_at,
            updated_at: self.updated_at,
            fields,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow {
    pub collection: String,
    pub id: String,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AdminRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: DocumentId(row.id),
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Admin> for AdminRow {
    fn from(admin: &Admin) -> Self {
        AdminRow {
            id: admin.id.0.clone(),
            email: admin.email.clone(),
            password_hash: admin.password_hash.clone(),
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}
