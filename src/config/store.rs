use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Firestore,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "firestore" => Ok(StoreBackend::Firestore),
            other => bail!("Unknown STORE_BACKEND: {}", other),
        }
    }
}

/// Connection settings for the hosted document database.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub firestore: Option<FirestoreConfig>,
    pub seed_demo_data: bool,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let backend: StoreBackend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .parse()?;

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(backend == StoreBackend::Memory);

        let firestore = match backend {
            StoreBackend::Memory => None,
            StoreBackend::Firestore => Some(FirestoreConfig::from_env()?),
        };

        Ok(StoreConfig {
            backend,
            firestore,
            seed_demo_data,
        })
    }
}

impl FirestoreConfig {
    pub fn from_env() -> Result<Self> {
        let project_id = env::var("FIRESTORE_PROJECT_ID")
            .context("FIRESTORE_PROJECT_ID is required for the firestore backend")?;
        let base_url = env::var("FIRESTORE_BASE_URL")
            .unwrap_or_else(|_| "https://firestore.googleapis.com/v1".to_string());
        let timeout_secs = env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(FirestoreConfig {
            base_url,
            project_id,
            api_key: env::var("FIRESTORE_API_KEY").ok().filter(|v| !v.is_empty()),
            bearer_token: env::var("FIRESTORE_BEARER_TOKEN").ok().filter(|v| !v.is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
