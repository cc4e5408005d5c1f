use crate::models::Record;
use crate::store::{Document, DocumentStore};

use super::ServiceError;

/// Decode a listing, skipping documents that do not fit the record shape.
pub(crate) fn decode_all<R: Record>(documents: Vec<Document>) -> Vec<R> {
    documents
        .iter()
        .filter_map(|document| match R::from_document(document) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed {} document {}: {}",
                    R::COLLECTION,
                    document.id,
                    e
                );
                None
            }
        })
        .collect()
}

pub(crate) fn decode_one<R: Record>(document: &Document) -> Result<R, ServiceError> {
    R::from_document(document).map_err(|e| ServiceError::MalformedDocument {
        collection: R::COLLECTION,
        id: document.id.clone(),
        reason: e.to_string(),
    })
}

/// Fetch a raw document, failing with `NotFound` when it does not exist.
pub(crate) async fn fetch_document<R: Record>(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<Document, ServiceError> {
    store
        .get(R::COLLECTION, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound {
            collection: R::COLLECTION,
            id: id.to_string(),
        })
}

pub(crate) async fn fetch<R: Record>(store: &dyn DocumentStore, id: &str) -> Result<R, ServiceError> {
    let document = fetch_document::<R>(store, id).await?;
    decode_one(&document)
}

pub(crate) async fn list<R: Record>(store: &dyn DocumentStore) -> Result<Vec<R>, ServiceError> {
    let documents = store.list(R::COLLECTION).await.map_err(|e| {
        tracing::error!("Failed to list {}: {}", R::COLLECTION, e);
        e
    })?;
    Ok(decode_all(documents))
}
