//! Configuration management for the content server
//!
//! Configuration can come from a YAML file, from environment variables, or
//! be built in code; all three end up in [`Config`].

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Background server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ProviderError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate YAML configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `BGSERVE_HOST`, `BGSERVE_PORT`, `BGSERVE_WORKERS`,
    /// `BGSERVE_PROXY` and `JUPYTERHUB_SERVICE_PREFIX`; anything unset keeps
    /// its default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut server = ServerConfig::default();

        if let Some(host) = lookup("BGSERVE_HOST") {
            server.host = host;
        }
        if let Some(port) = lookup("BGSERVE_PORT") {
            server.port = port
                .parse()
                .map_err(|e| ProviderError::Config(format!("Invalid BGSERVE_PORT: {}", e)))?;
        }
        if let Some(workers) = lookup("BGSERVE_WORKERS") {
            server.workers = workers
                .parse()
                .map_err(|e| ProviderError::Config(format!("Invalid BGSERVE_WORKERS: {}", e)))?;
        }
        if let Some(proxy) = lookup("BGSERVE_PROXY") {
            server.proxy = matches!(proxy.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(prefix) = lookup(JUPYTERHUB_SERVICE_PREFIX) {
            if !prefix.is_empty() {
                server.service_prefix = Some(prefix);
            }
        }

        let config = Self { server };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        Validate::validate(&self.server)
            .map_err(|e| ProviderError::Config(format!("Server config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ProviderError::from)
    }
}
