// Admin authentication: provider sign-in, session tokens and the request guard

pub mod errors;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod provider;
pub mod service;

pub use errors::AuthError;
pub use jwt::{extract_bearer_token, JwtService};
pub use middleware::{cors_layer, jwt_auth_middleware, security_headers_layer};
pub use models::*;
pub use password::{hash_password, verify_password, PasswordError};
pub use provider::{build_authenticator, Authenticator, FirebaseAuthenticator, StaticAuthenticator};
pub use service::AuthService;

#[cfg(test)]
pub use provider::MockAuthenticator;
