use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

use crate::auth::{
    AdminSession, AuthError, AuthResponse, Authenticator, JwtService, LoginRequest,
    MessageResponse,
};
use crate::models::FormErrors;

#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    authenticator: Arc<dyn Authenticator>,
    // jti -> exp, kept until the token would have expired anyway
    revoked: Arc<RwLock<HashMap<String, usize>>>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(authenticator: Arc<dyn Authenticator>, jwt_service: JwtService) -> Self {
        Self {
            jwt_service,
            authenticator,
            revoked: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Verify credentials with the provider and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        request
            .validate()
            .map_err(|errors| AuthError::Validation(FormErrors::from(errors)))?;

        let identity = self
            .authenticator
            .sign_in(request.email.trim(), &request.password)
            .await?;

        let access_token = self
            .jwt_service
            .create_access_token(&identity.account_id, &identity.email)?;
        let admin = self.jwt_service.extract_session(&access_token)?;

        tracing::info!("Admin {} signed in", admin.email);

        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            admin,
        })
    }

    /// Revoke the token until it expires
    pub async fn logout(&self, token: &str) -> Result<MessageResponse, AuthError> {
        let claims = self.jwt_service.validate_token(token)?;
        let now = Utc::now().timestamp() as usize;

        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti, claims.exp);

        tracing::info!("Admin {} signed out", claims.email);

        Ok(MessageResponse {
            message: "Successfully logged out".to_string(),
        })
    }

    pub async fn is_token_revoked(&self, jti: &str) -> bool {
        self.revoked.read().await.contains_key(jti)
    }

    /// Validate admin session from token
    pub async fn validate_session(&self, token: &str) -> Result<AdminSession, AuthError> {
        let session = self.jwt_service.extract_session(token)?;

        if self.is_token_revoked(&session.jti).await {
            return Err(AuthError::TokenRevoked);
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MockAuthenticator, ProviderIdentity};

    fn service_with(authenticator: MockAuthenticator) -> AuthService {
        AuthService::new(Arc::new(authenticator), JwtService::new("test_secret"))
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_for_provider_identity() {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_sign_in()
            .withf(|email, password| email.to_string() == "admin@fitnessscout.dev" && password.to_string() == "pw")
            .times(1)
            .returning(|email, _| {
                Ok(ProviderIdentity {
                    account_id: "uid-1".to_string(),
                    email: email.to_string(),
                })
            });

        let service = service_with(authenticator);
        let response = service
            .login(login_request(" admin@fitnessscout.dev ", "pw"))
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 12 * 60 * 60);
        assert_eq!(response.admin.account_id, "uid-1");

        let session = service.validate_session(&response.access_token).await.unwrap();
        assert_eq!(session.email, "admin@fitnessscout.dev");
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_provider() {
        let mut authenticator = MockAuthenticator::new();
        authenticator.expect_sign_in().times(0);

        let service = service_with(authenticator);
        let err = service.login(login_request("admin", "")).await.unwrap_err();

        match err {
            AuthError::Validation(fields) => {
                assert_eq!(fields.get("email"), Some("Please enter a valid email address"));
                assert_eq!(fields.get("password"), Some("Password is required"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_provider_rejection_propagates() {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_sign_in()
            .returning(|_, _| Err(AuthError::InvalidCredentials));

        let service = service_with(authenticator);
        let err = service
            .login(login_request("admin@fitnessscout.dev", "bad"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let mut authenticator = MockAuthenticator::new();
        authenticator.expect_sign_in().returning(|email, _| {
            Ok(ProviderIdentity {
                account_id: "uid-1".to_string(),
                email: email.to_string(),
            })
        });

        let service = service_with(authenticator);
        let token = service
            .login(login_request("admin@fitnessscout.dev", "pw"))
            .await
            .unwrap()
            .access_token;

        service.logout(&token).await.unwrap();

        assert!(matches!(
            service.validate_session(&token).await,
            Err(AuthError::TokenRevoked)
        ));
    }
}
