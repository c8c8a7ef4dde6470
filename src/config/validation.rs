//! Configuration validation

use super::models::{CorsConfig, ServerConfig};

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        ServerConfig::validate(self)?;
        self.cors.validate().map_err(|e| format!("CORS config error: {}", e))
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        CorsConfig::validate(self)
    }
}
