use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::FormErrors;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token revoked")]
    TokenRevoked,
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("Validation failed: {0}")]
    Validation(FormErrors),
    #[error("Authentication provider error: {0}")]
    Provider(String),
    #[error("Authentication provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] crate::auth::password::PasswordError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::TokenRevoked => (StatusCode::UNAUTHORIZED, "Token revoked"),
            AuthError::MissingAuthHeader => (StatusCode::UNAUTHORIZED, "Missing authorization header"),
            AuthError::InvalidAuthHeaderFormat => (StatusCode::UNAUTHORIZED, "Invalid authorization header format"),
            AuthError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Validation failed"),
            AuthError::Provider(_) => (StatusCode::BAD_GATEWAY, "Authentication provider error"),
            AuthError::Transport(_) => (StatusCode::BAD_GATEWAY, "Authentication provider unreachable"),
            AuthError::Jwt(_) => (StatusCode::UNAUTHORIZED, "Token error"),
            AuthError::PasswordHashing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Password processing error"),
        };

        if status.is_server_error() {
            tracing::error!("Authentication failure: {}", self);
        }

        let body = match &self {
            AuthError::Validation(fields) => json!({
                "error": error_message,
                "message": self.to_string(),
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
