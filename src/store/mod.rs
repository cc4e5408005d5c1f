// Document store collaborator

pub mod codec;
pub mod firestore;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Top-level fields of a stored document.
pub type Fields = Map<String, Value>;

/// Named collections the dashboard reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Users,
    Gyms,
    DietPlans,
    Events,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Gyms,
        Collection::DietPlans,
        Collection::Events,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "Users",
            Collection::Gyms => "Gyms",
            Collection::DietPlans => "dietPlans",
            Collection::Events => "upcoming_events",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.as_str() == s)
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}

/// A document as returned by the store: its id plus raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode the fields into a typed record.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document {collection}/{id} not found")]
    NotFound { collection: Collection, id: String },
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Store responded with {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("Failed to decode store payload: {0}")]
    Decode(String),
}

/// Per-collection CRUD against the remote document database.
///
/// No query filtering is pushed down; callers retrieve whole collections
/// and filter locally. `update` merges top-level fields into an existing
/// document and fails when the document is missing. `delete` succeeds for
/// absent documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError>;

    async fn create(&self, collection: Collection, fields: Fields) -> Result<String, StoreError>;

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
}

/// Store handle shared by the services.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Serialize a record into store fields.
pub fn to_fields<T: Serialize>(record: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(record).map_err(|e| StoreError::Decode(e.to_string()))? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Decode(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Users.as_str(), "Users");
        assert_eq!(Collection::Gyms.as_str(), "Gyms");
        assert_eq!(Collection::DietPlans.as_str(), "dietPlans");
        assert_eq!(Collection::Events.as_str(), "upcoming_events");

        assert_eq!("upcoming_events".parse::<Collection>().unwrap(), Collection::Events);
        assert!("events".parse::<Collection>().is_err());
    }

    #[test]
    fn test_to_fields_rejects_non_objects() {
        let fields = to_fields(&json!({"a": 1})).unwrap();
        assert_eq!(fields.get("a"), Some(&json!(1)));

        assert!(to_fields(&json!([1, 2])).is_err());
    }
}
