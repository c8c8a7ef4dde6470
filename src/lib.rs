//! # bgserve
//!
//! A local, ephemeral HTTP server that runs in the background of the calling
//! process and hands out URLs for files, directory trees and in-memory content.
//!
//! ## Features
//!
//! - **Zero setup**: the server binds an ephemeral loopback port on first use
//! - **Files and directories**: serve a single file, or any file under a
//!   registered directory, without path traversal escapes
//! - **In-memory content**: text and bytes with a content type picked from the
//!   extension you give them
//! - **Pluggable mounts**: implement [`Mount`] to accept other inputs and map
//!   them onto file, directory or in-memory resources
//! - **Proxy aware**: URLs can be emitted relative to a Jupyter-style proxy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bgserve::{CreateOptions, Provider};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Provider::with_defaults()?;
//!
//!     let page = provider.create(std::path::Path::new("report/index.html"))?;
//!     let data = provider.create_with(
//!         r#"{"ok": true}"#,
//!         CreateOptions::new().with_extension(".json"),
//!     )?;
//!
//!     println!("page: {}", page.url());
//!     println!("data: {}", data.url());
//!
//!     provider.stop();
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod provider;
pub mod server;
pub mod utils;

pub use config::Config;
pub use crate::core::{Content, ContentMount, CreateOptions, FileMount, Mount, MountTable, ResourceKind};
pub use provider::{Provider, ResourceHandle};
pub use utils::error::{ProviderError, Result};
pub use utils::logging::{LogFormat, LogLevel, init_logging, init_logging_with_format};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
