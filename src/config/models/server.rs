//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::warn;

/// Environment variable set by JupyterHub for single-user servers
pub const JUPYTERHUB_SERVICE_PREFIX: &str = "JUPYTERHUB_SERVICE_PREFIX";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port, 0 for an ephemeral port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Keep-alive for idle connections in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,
    /// How long `stop` waits for in-flight requests, in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
    /// Publish proxy-relative URLs (`/proxy/<port>`) instead of absolute ones
    #[serde(default)]
    pub proxy: bool,
    /// Path prefix placed in front of `/proxy/<port>`
    #[serde(default)]
    pub service_prefix: Option<String>,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            keep_alive: default_keep_alive(),
            shutdown_timeout: default_shutdown_timeout(),
            proxy: false,
            service_prefix: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Merge server configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.host != default_host() {
            self.host = other.host;
        }
        if other.port != default_port() {
            self.port = other.port;
        }
        if other.workers != default_workers() {
            self.workers = other.workers;
        }
        if other.keep_alive != default_keep_alive() {
            self.keep_alive = other.keep_alive;
        }
        if other.shutdown_timeout != default_shutdown_timeout() {
            self.shutdown_timeout = other.shutdown_timeout;
        }
        if other.proxy {
            self.proxy = other.proxy;
        }
        if other.service_prefix.is_some() {
            self.service_prefix = other.service_prefix;
        }
        self.cors = self.cors.merge(other.cors);
        self
    }

    /// Get the bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn keep_alive_duration(&self) -> Duration {
        Duration::from_secs(self.keep_alive)
    }

    /// Base URL published for a server bound to `addr`.
    pub fn public_base_url(&self, addr: SocketAddr) -> String {
        if let Some(prefix) = &self.service_prefix {
            return format!("{}/proxy/{}", prefix.trim_end_matches('/'), addr.port());
        }
        if self.proxy {
            return format!("/proxy/{}", addr.port());
        }
        format!("http://{}", addr)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.workers == 0 {
            return Err("Workers cannot be 0".to_string());
        }

        if self.shutdown_timeout == 0 {
            return Err("Shutdown timeout cannot be 0".to_string());
        }

        if let Some(prefix) = &self.service_prefix {
            if !prefix.starts_with('/') {
                return Err(format!(
                    "Service prefix must start with '/': {}",
                    prefix
                ));
            }
        }

        if self.host != "127.0.0.1" && self.host != "localhost" && self.host != "::1" {
            warn!(
                host = %self.host,
                "Server is not bound to loopback; registered content is reachable from the network"
            );
        }

        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins (empty means allow all)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Max age for preflight requests
    #[serde(default = "default_cors_max_age")]
    pub max_age: u32,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec![],
            max_age: default_cors_max_age(),
        }
    }
}

impl CorsConfig {
    /// Merge CORS configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if !other.allowed_origins.is_empty() {
            self.allowed_origins = other.allowed_origins;
        }
        if other.max_age != default_cors_max_age() {
            self.max_age = other.max_age;
        }
        self
    }

    /// Check if CORS allows all origins
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled {
            for origin in &self.allowed_origins {
                if origin != "*" && !origin.starts_with("http://") && !origin.starts_with("https://")
                {
                    return Err(format!("Invalid CORS origin: {}", origin));
                }
            }
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_cors_max_age() -> u32 {
    3600
}
