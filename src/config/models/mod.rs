//! Configuration data models

pub mod server;

pub use server::*;

/// Default bind host; loopback only
pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default port; 0 asks the OS for an ephemeral port
pub fn default_port() -> u16 {
    0
}

/// Default number of worker threads
pub fn default_workers() -> usize {
    2
}

/// Default keep-alive in seconds
pub fn default_keep_alive() -> u64 {
    1
}

/// Default graceful shutdown timeout in seconds
pub fn default_shutdown_timeout() -> u64 {
    5
}
