//! Error types for the content server

use thiserror::Error;

/// Result type alias for the content server
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Main error type for the content server
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No mount accepted the content passed to `create`
    #[error("Cannot create resource for {0}: no mount handles this input")]
    UnhandledInput(String),

    /// The background server is not running
    #[error("Server not running")]
    NotRunning,

    /// Binding the listener failed
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// A mount prefix is malformed
    #[error("Invalid mount prefix: {0}")]
    InvalidMount(String),

    /// Two mounts would compete for the same request paths
    #[error("Mount prefix {0} collides with another mount")]
    DuplicateMount(String),

    /// A custom response header is not a valid HTTP header
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request path does not resolve to a live resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request used a method other than GET or HEAD
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Background server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
