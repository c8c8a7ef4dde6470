//! HTTP server implementation
//!
//! This module provides the background server and request dispatch.

pub mod handlers;
pub mod server;
pub mod state;


pub use server::BackgroundServer;
pub use state::AppState;
