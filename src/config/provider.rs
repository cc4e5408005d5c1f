use anyhow::{bail, Context, Result};
use std::env;

use crate::auth::hash_password;

/// Which authentication collaborator verifies admin credentials.
#[derive(Debug, Clone)]
pub enum AuthProviderConfig {
    /// The hosted identity service's email/password sign-in.
    Firebase { api_key: String, base_url: String },
    /// A single configured administrator with a bcrypt password hash.
    Static {
        admin_email: String,
        password_hash: String,
    },
}

impl AuthProviderConfig {
    pub fn from_env() -> Result<Self> {
        let provider = env::var("AUTH_PROVIDER").unwrap_or_else(|_| "static".to_string());

        match provider.to_lowercase().as_str() {
            "firebase" => Ok(AuthProviderConfig::Firebase {
                api_key: env::var("FIREBASE_API_KEY")
                    .context("FIREBASE_API_KEY is required for the firebase auth provider")?,
                base_url: env::var("FIREBASE_AUTH_BASE_URL")
                    .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".to_string()),
            }),
            "static" => Ok(AuthProviderConfig::Static {
                admin_email: env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@fitnessscout.dev".to_string()),
                password_hash: match env::var("ADMIN_PASSWORD_HASH") {
                    Ok(hash) => hash,
                    Err(_) => {
                        let password = env::var("ADMIN_PASSWORD").context(
                            "ADMIN_PASSWORD_HASH or ADMIN_PASSWORD is required for the static auth provider",
                        )?;
                        hash_password(&password)?
                    }
                },
            }),
            other => bail!("Unknown AUTH_PROVIDER: {}", other),
        }
    }
}
