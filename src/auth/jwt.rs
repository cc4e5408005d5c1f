use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::{AdminSession, AuthError, Claims};

/// JWT token service for creating and validating admin session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("access_token_expires_in", &self.access_token_expires_in)
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given secret and the default 12 hour lifetime
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(12))
    }

    pub fn with_ttl(secret: &str, access_token_expires_in: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in,
        }
    }

    /// Create an access token for a signed-in administrator
    pub fn create_access_token(&self, account_id: &str, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.access_token_expires_in;

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    pub fn extract_session(&self, token: &str) -> Result<AdminSession, AuthError> {
        let claims = self.validate_token(token)?;
        Ok(AdminSession::from_claims(&claims))
    }

    /// Get access token expiration time in seconds
    pub fn access_token_expires_in_seconds(&self) -> usize {
        self.access_token_expires_in.num_seconds() as usize
    }
}

/// Extract bearer token from authorization header
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AuthError> {
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::InvalidAuthHeaderFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_creation_and_validation() {
        let jwt_service = JwtService::new("test_secret");

        let token = jwt_service
            .create_access_token("acct-1", "admin@fitnessscout.dev")
            .unwrap();
        let claims = jwt_service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "acct-1");
        assert_eq!(claims.email, "admin@fitnessscout.dev");
        assert_eq!(claims.exp - claims.iat, 12 * 60 * 60);
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(extract_bearer_token("Bearer test_token").unwrap(), "test_token");

        assert!(extract_bearer_token("Invalid header").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a");
        let verifier = JwtService::new("secret-b");
        let token = issuer.create_access_token("acct-1", "a@b.co").unwrap();

        assert!(matches!(verifier.validate_token(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let jwt_service = JwtService::with_ttl("test_secret", Duration::hours(-1));
        let token = jwt_service.create_access_token("acct-1", "a@b.co").unwrap();

        assert!(matches!(jwt_service.validate_token(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let jwt_service = JwtService::new("test_secret");
        let first = jwt_service.extract_session(&jwt_service.create_access_token("a", "a@b.co").unwrap()).unwrap();
        let second = jwt_service.extract_session(&jwt_service.create_access_token("a", "a@b.co").unwrap()).unwrap();
        assert_ne!(first.jti, second.jti);
    }
}
