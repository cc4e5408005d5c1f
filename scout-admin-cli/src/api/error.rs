use reqwest::StatusCode;
use scout_admin::models::FormErrors;
use serde::Deserialize;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    fields: Option<FormErrors>,
}

impl ApiError {
    /// Map a failed response onto an error, reading the server's
    /// `{"error", "message", "fields"}` body when there is one.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();

        if let Some(fields) = parsed.fields.filter(|fields| !fields.is_empty()) {
            return ApiError::Validation(fields);
        }

        let msg = if !parsed.message.is_empty() {
            parsed.message
        } else if !body.is_empty() {
            body
        } else {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(msg),
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            StatusCode::CONFLICT => ApiError::Conflict(msg),
            status if status.is_server_error() => ApiError::ServerError(msg),
            status if status.is_client_error() => ApiError::BadRequest(msg),
            _ => ApiError::Unknown(msg),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::NotLoggedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_status() {
        let error = ApiError::from_status(StatusCode::UNAUTHORIZED, String::new());
        assert!(matches!(error, ApiError::Unauthorized(ref m) if m == "Unauthorized"));

        let error = ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"error":"Not found","message":"Document Gyms/x not found"}"#.to_string(),
        );
        assert!(matches!(error, ApiError::NotFound(ref m) if m == "Document Gyms/x not found"));

        let error = ApiError::from_status(StatusCode::CONFLICT, "already paid".to_string());
        assert!(matches!(error, ApiError::Conflict(_)));

        let error = ApiError::from_status(StatusCode::BAD_GATEWAY, String::new());
        assert!(matches!(error, ApiError::ServerError(_)));
    }

    #[test]
    fn test_validation_body_carries_fields() {
        let body = r#"{"error":"Validation failed","message":"Validation failed","fields":{"title":"Title is required"}}"#;
        match ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body.to_string()) {
            ApiError::Validation(fields) => assert_eq!(fields.get("title"), Some("Title is required")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
