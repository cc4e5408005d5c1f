use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;

/// Whether an administrator is signed in, backed by the persisted token.
#[derive(Debug, Clone)]
pub struct SessionState {
    config: Config,
    path: PathBuf,
}

impl SessionState {
    /// Start from whatever token the config file already holds.
    pub fn init(config: Config, path: PathBuf) -> Self {
        if !config.auth.admin_token.is_empty() {
            tracing::debug!("Restored admin session from {}", path.display());
        }
        Self { config, path }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.config.auth.admin_token.is_empty()
    }

    pub fn token(&self) -> Option<&str> {
        if self.is_authenticated() {
            Some(&self.config.auth.admin_token)
        } else {
            None
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn login(&mut self, token: String) -> Result<()> {
        self.config.auth.admin_token = token;
        self.config.save(&self.path)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.config.auth.admin_token.clear();
        self.config.save(&self.path)
    }
}
