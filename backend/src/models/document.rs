//! Document primitives shared by every collection.
//!
//! A [`Document`] is a flat JSON object with three store-managed fields
//! (`_id`, `createdAt`, `updatedAt`). Entities are typed views over a
//! document's remaining fields, see [`Resource`] and [`Record`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::validation::ValidationError;

/// Field names owned by the store; never taken from request bodies.
pub const RESERVED_FIELDS: [&str; 3] = ["_id", "createdAt", "updatedAt"];

/// Store-assigned document identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh random identifier (32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Named collections in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Events,
    Jobs,
    JobApplications,
    Admissions,
    Parents,
    Contacts,
    Activities,
    HomeStats,
}

impl Collection {
    pub const ALL: [Collection; 9] = [
        Collection::Users,
        Collection::Events,
        Collection::Jobs,
        Collection::JobApplications,
        Collection::Admissions,
        Collection::Parents,
        Collection::Contacts,
        Collection::Activities,
        Collection::HomeStats,
    ];

    /// Storage name of the collection.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Events => "events",
            Collection::Jobs => "jobs",
            Collection::JobApplications => "job_applications",
            Collection::Admissions => "admissions",
            Collection::Parents => "parents",
            Collection::Contacts => "contacts",
            Collection::Activities => "activities",
            Collection::HomeStats => "home_stats",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown collection: {}", s))
    }
}

/// A stored document: store-managed metadata plus the entity's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a new document with a generated id.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self::with_id(DocumentId::generate(), fields)
    }

    /// Create a new document under a caller-chosen id.
    pub fn with_id(id: DocumentId, mut fields: Map<String, Value>) -> Self {
        strip_reserved(&mut fields);
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Replace top-level fields with those in `patch` and bump `updated_at`.
    pub fn merge(&mut self, mut patch: Map<String, Value>) {
        strip_reserved(&mut patch);
        for (key, value) in patch {
            self.fields.insert(key, value);
        }
        self.touch();
    }

    /// Swap the whole field set, keeping id and creation time.
    pub fn replace_fields(&mut self, mut fields: Map<String, Value>) {
        strip_reserved(&mut fields);
        self.fields = fields;
        self.touch();
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn touch(&mut self) {
        let now = Utc::now();
        // Keep updated_at monotonic even if the clock steps backwards.
        self.updated_at = now.max(self.created_at);
    }
}

/// Drop store-owned keys from a client-supplied field map.
pub fn strip_reserved(fields: &mut Map<String, Value>) {
    for key in RESERVED_FIELDS {
        fields.remove(key);
    }
}

/// An entity stored as a document in one collection.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection holding documents of this type.
    const COLLECTION: Collection;
    /// Singular name used in response messages.
    const LABEL: &'static str;

    /// Check required fields and value constraints.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Serialize into the field map that gets stored.
    fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "{} must serialize to a JSON object, got {}",
                Self::LABEL,
                other
            ))),
        }
    }

    /// Parse and validate a client-supplied field map.
    fn from_fields(mut fields: Map<String, Value>) -> Result<Self, ValidationError> {
        strip_reserved(&mut fields);
        let entity: Self = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;
        entity.validate()?;
        Ok(entity)
    }
}

/// Typed view of a stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: Resource> Record<T> {
    pub fn from_document(document: Document) -> Result<Self, serde_json::Error> {
        let data = serde_json::from_value(Value::Object(document.fields))?;
        Ok(Self {
            id: document.id,
            data,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_new_document_strips_reserved_fields() {
        let doc = Document::new(fields(json!({
            "_id": "client-chosen",
            "createdAt": "yesterday",
            "title": "Sports Day"
        })));
        assert_ne!(doc.id.as_str(), "client-chosen");
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.field("title"), Some(&json!("Sports Day")));
    }

    #[test]
    fn test_merge_replaces_top_level_fields_only() {
        let mut doc = Document::new(fields(json!({"title": "A", "description": "old"})));
        let created = doc.created_at;
        doc.merge(fields(json!({"description": "new", "_id": "x"})));
        assert_eq!(doc.field("title"), Some(&json!("A")));
        assert_eq!(doc.field("description"), Some(&json!("new")));
        assert_eq!(doc.created_at, created);
        assert!(doc.updated_at >= created);
    }

    #[test]
    fn test_document_serializes_flat_with_underscore_id() {
        let doc = Document::with_id(DocumentId::new("abc"), fields(json!({"title": "T"})));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["title"], "T");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_collection_round_trips_through_name() {
        for collection in Collection::ALL {
            assert_eq!(collection.name().parse::<Collection>().unwrap(), collection);
        }
        assert!("admins".parse::<Collection>().is_err());
    }

    #[test]
    fn test_generated_ids_are_unique_hex() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
