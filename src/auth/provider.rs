use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::auth::password::verify_password;
use crate::auth::{AuthError, ProviderIdentity};
use crate::config::AuthProviderConfig;

/// Email/password verification against the authentication collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderIdentity, AuthError>;
}

/// Build the configured authenticator.
pub fn build_authenticator(config: &AuthProviderConfig) -> Result<Box<dyn Authenticator>, AuthError> {
    match config {
        AuthProviderConfig::Firebase { api_key, base_url } => {
            Ok(Box::new(FirebaseAuthenticator::new(base_url, api_key)?))
        }
        AuthProviderConfig::Static {
            admin_email,
            password_hash,
        } => Ok(Box::new(StaticAuthenticator::new(admin_email, password_hash))),
    }
}

/// Identity toolkit `accounts:signInWithPassword` client.
pub struct FirebaseAuthenticator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for FirebaseAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseAuthenticator")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    #[serde(default)]
    message: String,
}

impl FirebaseAuthenticator {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Authenticator for FirebaseAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderIdentity, AuthError> {
        let url = format!("{}/v1/accounts:signInWithPassword", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: SignInResponse = response.json().await?;
            let email = if body.email.is_empty() {
                email.to_string()
            } else {
                body.email
            };
            return Ok(ProviderIdentity {
                account_id: body.local_id,
                email,
            });
        }

        let message = response
            .json::<ProviderErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_default();

        // Wrong password, unknown email and disabled accounts all come back as 400
        if status == reqwest::StatusCode::BAD_REQUEST {
            tracing::warn!("Sign-in rejected by provider: {}", message);
            return Err(AuthError::InvalidCredentials);
        }

        tracing::error!("Sign-in provider responded with {}: {}", status, message);
        Err(AuthError::Provider(format!("{}: {}", status, message)))
    }
}

/// A single administrator configured with a bcrypt hash.
#[derive(Clone)]
pub struct StaticAuthenticator {
    admin_email: String,
    password_hash: String,
}

impl std::fmt::Debug for StaticAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAuthenticator")
            .field("admin_email", &self.admin_email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl StaticAuthenticator {
    pub fn new(admin_email: &str, password_hash: &str) -> Self {
        Self {
            admin_email: admin_email.trim().to_lowercase(),
            password_hash: password_hash.to_string(),
        }
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderIdentity, AuthError> {
        if email.trim().to_lowercase() != self.admin_email {
            return Err(AuthError::InvalidCredentials);
        }

        if !verify_password(password, &self.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(ProviderIdentity {
            account_id: "static-admin".to_string(),
            email: self.admin_email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_firebase_sign_in_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "web-key"))
            .and(body_partial_json(json!({
                "email": "admin@fitnessscout.dev",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "uid-42",
                "email": "admin@fitnessscout.dev",
                "idToken": "opaque",
                "expiresIn": "3600"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let authenticator = FirebaseAuthenticator::new(&server.uri(), "web-key").unwrap();
        let identity = authenticator
            .sign_in("admin@fitnessscout.dev", "pw")
            .await
            .unwrap();

        assert_eq!(identity.account_id, "uid-42");
        assert_eq!(identity.email, "admin@fitnessscout.dev");
    }

    #[tokio::test]
    async fn test_firebase_rejection_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "INVALID_LOGIN_CREDENTIALS"}
            })))
            .mount(&server)
            .await;

        let authenticator = FirebaseAuthenticator::new(&server.uri(), "web-key").unwrap();
        let result = authenticator.sign_in("admin@fitnessscout.dev", "nope").await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_firebase_server_error_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let authenticator = FirebaseAuthenticator::new(&server.uri(), "web-key").unwrap();
        let result = authenticator.sign_in("admin@fitnessscout.dev", "pw").await;

        assert!(matches!(result, Err(AuthError::Provider(_))));
    }

    #[tokio::test]
    async fn test_static_authenticator() {
        let hash = bcrypt::hash("letmein", 4).unwrap();
        let authenticator = StaticAuthenticator::new("Admin@FitnessScout.dev", &hash);

        let identity = authenticator
            .sign_in("admin@fitnessscout.dev", "letmein")
            .await
            .unwrap();
        assert_eq!(identity.email, "admin@fitnessscout.dev");

        assert!(matches!(
            authenticator.sign_in("admin@fitnessscout.dev", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticator.sign_in("someone@else.dev", "letmein").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
