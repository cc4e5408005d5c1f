use async_trait::async_trait;
use indexmap::IndexMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Collection, Document, DocumentStore, Fields, StoreError};

const AUTO_ID_LEN: usize = 20;

/// In-process document store used for development and tests.
///
/// Collections keep insertion order so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, IndexMap<String, Fields>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document under a known id.
    pub async fn insert(&self, collection: Collection, id: impl Into<String>, fields: Fields) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .insert(id.into(), fields);
    }

    pub async fn len(&self, collection: Collection) -> usize {
        let collections = self.collections.read().await;
        collections.get(&collection).map_or(0, |docs| docs.len())
    }

    pub async fn is_empty(&self) -> bool {
        let collections = self.collections.read().await;
        collections.values().all(|docs| docs.is_empty())
    }
}

/// Generate a 20 character alphanumeric id, the same shape the hosted store assigns.
pub fn generate_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn create(&self, collection: Collection, fields: Fields) -> Result<String, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        let mut id = generate_document_id();
        while docs.contains_key(&id) {
            id = generate_document_id();
        }

        docs.insert(id.clone(), fields);
        Ok(id)
    }

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })?;

        for (key, value) in fields {
            existing.insert(key, value);
        }

        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(&collection) {
            docs.shift_remove(id);
        }
        Ok(())
    }
}
