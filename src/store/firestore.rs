use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use super::codec::{decode_fields, document_id, encode_fields, field_path};
use super::{Collection, Document, DocumentStore, Fields, StoreError};
use crate::config::FirestoreConfig;

const PAGE_SIZE: u32 = 300;

/// REST adapter for the hosted document database.
#[derive(Clone)]
pub struct FirestoreStore {
    client: Client,
    documents_url: String,
    api_key: Option<String>,
    bearer_token: Option<String>,
}

impl std::fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("documents_url", &self.documents_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: Option<Value>,
}

impl WireDocument {
    fn into_document(self) -> Result<Document, StoreError> {
        let id = document_id(&self.name)
            .ok_or_else(|| StoreError::Decode(format!("invalid document name: {}", self.name)))?
            .to_string();

        let fields = match self.fields {
            Some(fields) => decode_fields(&fields)?,
            None => Fields::new(),
        };

        Ok(Document::new(id, fields))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            documents_url: format!(
                "{}/projects/{}/databases/(default)/documents",
                config.base_url.trim_end_matches('/'),
                config.project_id
            ),
            api_key: config.api_key.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.documents_url, collection)
    }

    fn document_url(&self, collection: Collection, id: &str) -> Result<String, StoreError> {
        if id.is_empty() || id.contains('/') {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(format!("{}/{}", self.collection_url(collection), id))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key)]);
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Map non-success responses onto store errors.
    async fn check(
        response: Response,
        collection: Collection,
        id: Option<&str>,
    ) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);

        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            }),
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                Err(StoreError::PermissionDenied(message))
            }
            _ => Err(StoreError::Remote {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let url = self.collection_url(collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .request(Method::GET, &url)
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = Self::check(request.send().await?, collection, None).await?;
            let page: ListDocumentsResponse = response.json().await?;

            for wire in page.documents {
                documents.push(wire.into_document()?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!("Listed {} documents from {}", documents.len(), collection);
        Ok(documents)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self.request(Method::GET, &url).send().await?;

        match Self::check(response, collection, Some(id)).await {
            Ok(response) => {
                let wire: WireDocument = response.json().await?;
                Ok(Some(wire.into_document()?))
            }
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, collection: Collection, fields: Fields) -> Result<String, StoreError> {
        let url = self.collection_url(collection);
        let response = self
            .request(Method::POST, &url)
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await?;

        let wire: WireDocument = Self::check(response, collection, None).await?.json().await?;
        let document = wire.into_document()?;
        Ok(document.id)
    }

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        // An empty mask would replace the whole document
        if fields.is_empty() {
            return Ok(());
        }

        let url = self.document_url(collection, id)?;
        let mut query: Vec<(&str, String)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", field_path(key)))
            .collect();
        query.push(("currentDocument.exists", "true".to_string()));

        let response = self
            .request(Method::PATCH, &url)
            .query(&query)
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await?;

        Self::check(response, collection, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self.request(Method::DELETE, &url).send().await?;

        match Self::check(response, collection, Some(id)).await {
            Ok(_) | Err(StoreError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
