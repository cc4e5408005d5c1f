use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::validation::is_valid_email;

/// JWT token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // Provider account id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,   // JWT ID (for revocation)
}

fn message(code: &'static str, text: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(text));
    error
}

#[allow(clippy::ptr_arg)]
fn validate_login_email(email: &String) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(message("required", "Email is required"));
    }
    if !is_valid_email(email) {
        return Err(message("email", "Please enter a valid email address"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_login_email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Identity confirmed by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub account_id: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: usize,
    pub admin: AdminSession,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Signed-in administrator, attached to requests by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub account_id: String,
    pub email: String,
    #[serde(skip)]
    pub jti: String,
    pub expires_at: usize,
}

impl AdminSession {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            account_id: claims.sub.clone(),
            email: claims.email.clone(),
            jti: claims.jti.clone(),
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormErrors;

    fn errors_for(email: &str, password: &str) -> FormErrors {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        request.validate().map(|_| FormErrors::new()).unwrap_or_else(FormErrors::from)
    }

    #[test]
    fn test_login_messages() {
        let errors = errors_for("", "");
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = errors_for("admin", "pw");
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert!(!errors.contains("password"));

        assert!(errors_for("admin@fitnessscout.dev", "pw").is_empty());
    }
}
