//! The provider: registration front door and server lifecycle
//!
//! A [`Provider`] owns an ordered [`MountTable`] and, once the first
//! registration succeeds, a [`BackgroundServer`] serving that table.
//!
//! ```rust,no_run
//! use bgserve::{CreateOptions, Provider};
//! use std::path::Path;
//!
//! # fn main() -> bgserve::Result<()> {
//! let provider = Provider::with_defaults()?;
//!
//! let file = provider.create(Path::new("data/hello.txt"))?;
//! let csv = provider.create_with("a,b\n1,2", CreateOptions::new().with_extension(".csv"))?;
//! println!("{} {}", file.url(), csv.url());
//!
//! provider.stop();
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::core::content::{Content, CreateOptions};
use crate::core::mount::{ContentMount, FileMount, Mount, MountTable};
use crate::core::resource::{Resource, ResourceKind};
use crate::server::BackgroundServer;
use crate::utils::error::{ProviderError, Result};
use actix_web::http::header::{HeaderName, HeaderValue};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the mounts and the background server
pub struct Provider {
    config: Config,
    mounts: Arc<MountTable>,
    server: RwLock<Option<BackgroundServer>>,
}

impl Provider {
    /// Create a provider with the default configuration.
    ///
    /// An empty mount list is allowed; every `create` then fails with
    /// [`ProviderError::UnhandledInput`].
    pub fn new(mounts: Vec<Box<dyn Mount>>) -> Result<Self> {
        Self::with_config(Config::default(), mounts)
    }

    /// Create a provider with an explicit configuration
    pub fn with_config(config: Config, mounts: Vec<Box<dyn Mount>>) -> Result<Self> {
        config.validate()?;
        let mounts = MountTable::new(mounts)?;
        debug!(mounts = ?mounts, "Created provider");

        Ok(Self {
            config,
            mounts: Arc::new(mounts),
            server: RwLock::new(None),
        })
    }

    /// Provider with a file mount at `/files` followed by a content mount at
    /// `/contents`
    pub fn with_defaults() -> Result<Self> {
        Self::new(Self::default_mounts())
    }

    pub fn default_mounts() -> Vec<Box<dyn Mount>> {
        vec![
            Box::new(FileMount::default()),
            Box::new(ContentMount::default()),
        ]
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mounts(&self) -> &MountTable {
        &self.mounts
    }

    /// Register `content` with default options
    pub fn create(&self, content: impl Into<Content>) -> Result<ResourceHandle> {
        self.create_with(content, CreateOptions::default())
    }

    /// Register `content` with the first mount that accepts it and return a
    /// handle whose URL is servable immediately.
    ///
    /// Starts the background server on first use.
    pub fn create_with(
        &self,
        content: impl Into<Content>,
        options: CreateOptions,
    ) -> Result<ResourceHandle> {
        let content = content.into();
        validate_headers(&options.headers)?;

        let mount = self
            .mounts
            .find_handler(&content)
            .ok_or_else(|| ProviderError::unhandled_input(content.describe()))?;

        let server = self.ensure_running()?;
        let base_url = match server.as_ref() {
            Some(server) => server.base_url().to_string(),
            None => return Err(ProviderError::NotRunning),
        };

        let resource = mount.register(content, &options)?;
        drop(server);

        Ok(ResourceHandle::new(&resource, &base_url, mount.prefix()))
    }

    /// Start the background server if needed and return the base URL
    pub fn start(&self) -> Result<String> {
        let server = self.ensure_running()?;
        server
            .as_ref()
            .map(|s| s.base_url().to_string())
            .ok_or(ProviderError::NotRunning)
    }

    /// Base URL of the running server.
    ///
    /// Does not start the server; use [`Provider::start`] for that.
    pub fn url(&self) -> Result<String> {
        self.server
            .read()
            .as_ref()
            .map(|s| s.base_url().to_string())
            .ok_or(ProviderError::NotRunning)
    }

    pub fn is_running(&self) -> bool {
        self.server.read().is_some()
    }

    /// Stop the server and forget every registration.
    ///
    /// In-flight requests are allowed to finish. Files on disk are left
    /// alone; in-memory content is dropped. Calling this on a stopped
    /// provider does nothing.
    pub fn stop(&self) {
        let mut server = self.server.write();
        if let Some(running) = server.take() {
            running.stop();
            self.mounts.clear();
            info!("Provider stopped");
        }
    }

    /// Read guard over a running server, starting it under the write lock if
    /// nobody has yet.
    fn ensure_running(&self) -> Result<RwLockReadGuard<'_, Option<BackgroundServer>>> {
        {
            let server = self.server.read();
            if server.is_some() {
                return Ok(server);
            }
        }

        let mut server = self.server.write();
        if server.is_none() {
            *server = Some(BackgroundServer::start(
                &self.config.server,
                Arc::clone(&self.mounts),
            )?);
        }
        Ok(RwLockWriteGuard::downgrade(server))
    }
}

impl Drop for Provider {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("mounts", &self.mounts)
            .field("server", &*self.server.read())
            .finish()
    }
}

fn validate_headers(headers: &[(String, String)]) -> Result<()> {
    for (name, value) in headers {
        if HeaderName::try_from(name.as_str()).is_err() {
            return Err(ProviderError::invalid_header(format!("name {:?}", name)));
        }
        if HeaderValue::try_from(value.as_str()).is_err() {
            return Err(ProviderError::invalid_header(format!(
                "value for {:?}",
                name
            )));
        }
    }
    Ok(())
}

/// Handle returned by [`Provider::create`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceHandle {
    id: String,
    kind: ResourceKind,
    mount: String,
    url: String,
}

impl ResourceHandle {
    fn new(resource: &Resource, base_url: &str, prefix: &str) -> Self {
        Self {
            id: resource.id().to_string(),
            kind: resource.kind(),
            mount: prefix.to_string(),
            url: format!("{}{}/{}", base_url, prefix, resource.id()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Prefix of the mount that registered the resource
    pub fn mount_prefix(&self) -> &str {
        &self.mount
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL of a file inside a directory resource
    pub fn url_for(&self, subpath: &str) -> String {
        format!("{}/{}", self.url, subpath.trim_start_matches('/'))
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
