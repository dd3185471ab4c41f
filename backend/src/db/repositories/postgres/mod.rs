//! Postgres repository implementation using Diesel.
//!
//! Documents are stored as JSONB rows in a single `documents` table keyed by
//! `(collection, id)`; a `seq` identity column gives the insertion order used
//! for newest-first listings. Admin accounts live in their own `admins` table
//! with a unique email index. The migrations in `backend/migrations` are
//! compiled into the binary and applied on startup.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Text};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use serde_json::Value;
use tokio::task;

use crate::db::repository::{
    AdminRepository, DocumentRepository, ErrorContext, RepositoryError, RepositoryResult,
};
use crate::models::{Admin, Collection, Document, DocumentId};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
}

impl PostgresConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            max_pool_size,
        })
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .build(manager)
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        // Run migrations once during initialization.
        {
            let mut conn = pool.get()?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| RepositoryError::internal(format!("Migration error: {e}")))?;
        Ok(())
    }

    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| RepositoryError::internal(e.to_string()))?
    }
}

fn document_not_found(operation: &str, collection: Collection, id: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Document {} not found", id),
        ErrorContext::new(operation)
            .with_entity(collection.name())
            .with_entity_id(id),
    )
}

fn admin_not_found(operation: &str, id: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        "Admin not found",
        ErrorContext::new(operation).with_entity("admin").with_entity_id(id),
    )
}

fn rows_to_documents(rows: Vec<DocumentRow>) -> RepositoryResult<Vec<Document>> {
    rows.into_iter().map(DocumentRow::into_document).collect()
}

#[async_trait]
impl DocumentRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn insert_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> RepositoryResult<Document> {
        let row = NewDocumentRow {
            collection: collection.name().to_string(),
            id: document.id.0.clone(),
            body: Value::Object(document.fields),
            created_at: document.created_at,
            updated_at: document.updated_at,
        };
        self.with_conn(move |conn| {
            diesel::insert_into(documents::table)
                .values(&row)
                .returning(DocumentRow::as_returning())
                .get_result::<DocumentRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_document"))?
                .into_document()
        })
        .await
    }

    async fn get_document(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> RepositoryResult<Document> {
        let id = id.0.clone();
        self.with_conn(move |conn| {
            documents::table
                .filter(documents::collection.eq(collection.name()))
                .filter(documents::id.eq(&id))
                .select(DocumentRow::as_select())
                .first::<DocumentRow>(conn)
                .optional()?
                .ok_or_else(|| document_not_found("get_document", collection, &id))?
                .into_document()
        })
        .await
    }

    async fn list_documents(&self, collection: Collection) -> RepositoryResult<Vec<Document>> {
        self.with_conn(move |conn| {
            let rows = documents::table
                .filter(documents::collection.eq(collection.name()))
                .order(documents::seq.desc())
                .select(DocumentRow::as_select())
                .load::<DocumentRow>(conn)?;
            rows_to_documents(rows)
        })
        .await
    }

    async fn find_documents(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> RepositoryResult<Vec<Document>> {
        let field = field.to_string();
        let value = value.clone();
        self.with_conn(move |conn| {
            let rows = sql_query(
                "SELECT collection, id, seq, body, created_at, updated_at \
                 FROM documents \
                 WHERE collection = $1 AND body -> $2 = $3 \
                 ORDER BY seq DESC",
            )
            .bind::<Text, _>(collection.name())
            .bind::<Text, _>(field)
            .bind::<Jsonb, _>(value)
            .load::<DocumentRow>(conn)?;
            rows_to_documents(rows)
        })
        .await
    }

    async fn replace_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> RepositoryResult<Document> {
        let id = document.id.0.clone();
        let body = Value::Object(document.fields);
        let updated_at = document.updated_at;
        self.with_conn(move |conn| {
            diesel::update(
                documents::table
                    .filter(documents::collection.eq(collection.name()))
                    .filter(documents::id.eq(&id)),
            )
            .set((documents::body.eq(body), documents::updated_at.eq(updated_at)))
            .returning(DocumentRow::as_returning())
            .get_result::<DocumentRow>(conn)
            .optional()?
            .ok_or_else(|| document_not_found("replace_document", collection, &id))?
            .into_document()
        })
        .await
    }

    async fn delete_document(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> RepositoryResult<()> {
        let id = id.0.clone();
        self.with_conn(move |conn| {
            let deleted = diesel::delete(
                documents::table
                    .filter(documents::collection.eq(collection.name()))
                    .filter(documents::id.eq(&id)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(document_not_found("delete_document", collection, &id));
            }
            Ok(())
        })
        .await
    }

    async fn count_documents(&self, collection: Collection) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            let count: i64 = documents::table
                .filter(documents::collection.eq(collection.name()))
                .count()
                .get_result(conn)?;
            Ok(count as usize)
        })
        .await
    }
}

#[async_trait]
impl AdminRepository for PostgresRepository {
    async fn find_admin_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let row = admins::table
                .filter(admins::email.eq(&email))
                .select(AdminRow::as_select())
                .first::<AdminRow>(conn)
                .optional()?;
            Ok(row.map(Admin::from))
        })
        .await
    }

    async fn get_admin(&self, id: &DocumentId) -> RepositoryResult<Admin> {
        let id = id.0.clone();
        self.with_conn(move |conn| {
            admins::table
                .find(&id)
                .select(AdminRow::as_select())
                .first::<AdminRow>(conn)
                .optional()?
                .map(Admin::from)
                .ok_or_else(|| admin_not_found("get_admin", &id))
        })
        .await
    }

    async fn insert_admin(&self, admin: Admin) -> RepositoryResult<Admin> {
        let row = AdminRow::from(&admin);
        self.with_conn(move |conn| {
            diesel::insert_into(admins::table)
                .values(&row)
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_admin"))?;
            Ok(admin)
        })
        .await
    }

    async fn update_admin(&self, admin: Admin) -> RepositoryResult<Admin> {
        let row = AdminRow::from(&admin);
        self.with_conn(move |conn| {
            let updated = diesel::update(admins::table.find(&row.id))
                .set(&row)
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_admin"))?;
            if updated == 0 {
                return Err(admin_not_found("update_admin", &row.id));
            }
            Ok(admin)
        })
        .await
    }

    async fn count_admins(&self) -> RepositoryResult<usize> {
        self.with_conn(|conn| {
            let count: i64 = admins::table.count().get_result(conn)?;
            Ok(count as usize)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::{Migration, MigrationSource};
    use diesel::pg::Pg;

    #[test]
    fn test_migrations_are_compiled_in() {
        let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).unwrap();
        assert_eq!(migrations.len(), 1);
        assert!(migrations[0]
            .name()
            .to_string()
            .ends_with("create_documents"));
    }
}
