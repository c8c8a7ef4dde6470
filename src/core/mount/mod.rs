//! Mounts
//!
//! A mount owns one URL prefix, decides which registration inputs it accepts
//! and keeps the registry of the resources it created. The provider keeps its
//! mounts in a [`MountTable`]; both registration and request dispatch scan the
//! table in order and the first match wins.

mod content;
mod file;

pub use content::ContentMount;
pub use file::FileMount;

use crate::core::content::{Content, CreateOptions};
use crate::core::resource::{Resolved, Resource};
use crate::utils::error::{ProviderError, Result};
use std::io;
use std::sync::Arc;
use tracing::debug;

/// Capability interface implemented by every mount variant
pub trait Mount: Send + Sync {
    /// Normalized URL prefix, e.g. `/files`
    fn prefix(&self) -> &str;

    /// Whether this mount can register `content`
    fn handles(&self, content: &Content) -> bool;

    /// Register `content` and return the new resource
    fn register(&self, content: Content, options: &CreateOptions) -> Result<Arc<Resource>>;

    /// Find a live resource by id
    fn lookup(&self, id: &str) -> Option<Arc<Resource>>;

    /// Number of live resources
    fn resource_count(&self) -> usize;

    /// Forget every resource; called when the provider stops
    fn clear(&self);
}

/// Bring a prefix into `/a/b` form.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    format!("/{}", trimmed)
}

fn validate_prefix(prefix: &str) -> Result<()> {
    let body = prefix.trim_start_matches('/');
    if body.is_empty() {
        return Err(ProviderError::invalid_mount(format!(
            "{:?} would shadow every path",
            prefix
        )));
    }
    for segment in body.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(ProviderError::invalid_mount(format!(
                "{:?} has an empty or relative segment",
                prefix
            )));
        }
        if segment.contains(['?', '#', '%', '\\']) {
            return Err(ProviderError::invalid_mount(format!(
                "{:?} contains reserved characters",
                prefix
            )));
        }
    }
    Ok(())
}

/// Segment-wise prefix test: `/a` nests `/a/b`, but not `/ab`.
fn nests(outer: &str, inner: &str) -> bool {
    let mut outer_segments = outer.trim_start_matches('/').split('/');
    let mut inner_segments = inner.trim_start_matches('/').split('/');
    loop {
        match (outer_segments.next(), inner_segments.next()) {
            (None, _) => return true,
            (Some(_), None) => return false,
            (Some(a), Some(b)) if a != b => return false,
            _ => {}
        }
    }
}

/// A request path matched to a mount and resource id
pub struct Route<'a> {
    pub mount: &'a dyn Mount,
    pub id: &'a str,
    pub subpath: &'a str,
}

/// Ordered set of mounts with unambiguous prefixes
pub struct MountTable {
    mounts: Vec<Box<dyn Mount>>,
}

impl MountTable {
    /// Build a table, rejecting malformed and colliding prefixes.
    pub fn new(mounts: Vec<Box<dyn Mount>>) -> Result<Self> {
        for (i, mount) in mounts.iter().enumerate() {
            validate_prefix(mount.prefix())?;
            for earlier in &mounts[..i] {
                if nests(earlier.prefix(), mount.prefix()) || nests(mount.prefix(), earlier.prefix())
                {
                    return Err(ProviderError::duplicate_mount(mount.prefix()));
                }
            }
        }
        Ok(Self { mounts })
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Mount> {
        self.mounts.iter().map(|m| m.as_ref())
    }

    /// First mount, in registration order, that accepts `content`
    pub fn find_handler(&self, content: &Content) -> Option<&dyn Mount> {
        self.iter().find(|mount| mount.handles(content))
    }

    /// Match a request path to a mount, resource id and remaining subpath.
    pub fn route<'a>(&'a self, path: &'a str) -> Option<Route<'a>> {
        let path = path.trim_start_matches('/');
        self.iter().find_map(|mount| {
            let rest = path
                .strip_prefix(mount.prefix().trim_start_matches('/'))?
                .strip_prefix('/')?;
            let (id, subpath) = rest.split_once('/').unwrap_or((rest, ""));
            if id.is_empty() {
                return None;
            }
            Some(Route { mount, id, subpath })
        })
    }

    /// Full dispatch: `Ok(None)` for anything that should be a 404.
    pub fn resolve(&self, path: &str) -> io::Result<Option<Resolved>> {
        let Some(route) = self.route(path) else {
            debug!(path = %path, "No mount matches request path");
            return Ok(None);
        };
        let Some(resource) = route.mount.lookup(route.id) else {
            debug!(mount = %route.mount.prefix(), id = %route.id, "Unknown resource id");
            return Ok(None);
        };
        resource.resolve(route.subpath)
    }

    /// Forget every registration in every mount
    pub fn clear(&self) {
        for mount in self.iter() {
            mount.clear();
        }
    }
}

impl std::fmt::Debug for MountTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|m| m.prefix()))
            .finish()
    }
}
