use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::FormErrors;
use crate::store::{Collection, StoreError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Document {collection}/{id} not found")]
    NotFound { collection: Collection, id: String },
    #[error("Gym {gym_id} has no transaction at index {index}")]
    TransactionNotFound { gym_id: String, index: usize },
    #[error("{0}")]
    InvalidTransition(String),
    #[error("Validation failed: {0}")]
    Validation(FormErrors),
    #[error("Malformed {collection} document {id}: {reason}")]
    MalformedDocument {
        collection: Collection,
        id: String,
        reason: String,
    },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => ServiceError::NotFound { collection, id },
            other => ServiceError::Store(other),
        }
    }
}

impl From<FormErrors> for ServiceError {
    fn from(errors: FormErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found"),
            ServiceError::TransactionNotFound { .. } => (StatusCode::NOT_FOUND, "Not found"),
            ServiceError::InvalidTransition(_) => (StatusCode::CONFLICT, "Invalid transition"),
            ServiceError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Validation failed"),
            ServiceError::MalformedDocument { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Malformed document")
            }
            ServiceError::Store(StoreError::PermissionDenied(_)) => {
                (StatusCode::BAD_GATEWAY, "Document store permission denied")
            }
            ServiceError::Store(_) => (StatusCode::BAD_GATEWAY, "Document store error"),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = match &self {
            ServiceError::Validation(fields) => json!({
                "error": error_message,
                "message": "Validation failed",
                "fields": fields,
            }),
            _ => json!({
                "error": error_message,
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err = ServiceError::from(StoreError::NotFound {
            collection: Collection::Gyms,
            id: "g1".to_string(),
        });
        assert!(matches!(err, ServiceError::NotFound { .. }));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_codes() {
        let conflict = ServiceError::InvalidTransition("already paid".to_string());
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let invalid = ServiceError::Validation(FormErrors::new());
        assert_eq!(invalid.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let remote = ServiceError::from(StoreError::Remote {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(remote.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
