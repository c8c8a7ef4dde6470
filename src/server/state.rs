//! Application state shared across HTTP handlers

use crate::config::ServerConfig;
use crate::core::mount::MountTable;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// The mount table is the same one the provider registers into, so a
/// resource is visible to request handlers as soon as its registration
/// returns.
#[derive(Clone)]
pub struct AppState {
    /// Ordered mounts used for dispatch
    pub mounts: Arc<MountTable>,
    /// Server configuration (shared read-only)
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(mounts: Arc<MountTable>, config: ServerConfig) -> Self {
        Self {
            mounts,
            config: Arc::new(config),
        }
    }
}
