//! File mount: single files and directory trees already on disk

use super::{Mount, normalize_prefix};
use crate::core::content::{Content, CreateOptions};
use crate::core::mime::normalize_extension;
use crate::core::registry::ResourceRegistry;
use crate::core::resource::{Resource, Source};
use crate::utils::error::{ProviderError, Result};
use std::sync::Arc;
use tracing::debug;

/// Default URL prefix for file resources
pub const DEFAULT_FILE_PREFIX: &str = "/files";

/// Serves existing files and directories without copying them.
///
/// Only the canonical path is recorded at registration, so each request
/// reads whatever the file holds at that moment.
#[derive(Debug)]
pub struct FileMount {
    prefix: String,
    registry: ResourceRegistry,
}

impl FileMount {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_prefix(prefix.as_ref()),
            registry: ResourceRegistry::new(),
        }
    }
}

impl Default for FileMount {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_PREFIX)
    }
}

impl Mount for FileMount {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn handles(&self, content: &Content) -> bool {
        content.as_path().is_some_and(|path| path.exists())
    }

    fn register(&self, content: Content, options: &CreateOptions) -> Result<Arc<Resource>> {
        let path = match content {
            Content::Path(path) => path,
            other => return Err(ProviderError::unhandled_input(other.describe())),
        };

        let canonical = path.canonicalize()?;
        let headers = options.headers.clone();

        let resource = if canonical.is_dir() {
            self.registry
                .register("", |id| Resource::new(id, Source::Directory(canonical), headers))
        } else {
            let suffix = canonical
                .extension()
                .and_then(|e| e.to_str())
                .map(normalize_extension)
                .unwrap_or_default();
            self.registry
                .register(&suffix, |id| Resource::new(id, Source::File(canonical), headers))
        };

        debug!(
            mount = %self.prefix,
            id = %resource.id(),
            kind = ?resource.kind(),
            path = %path.display(),
            "Registered file resource"
        );
        Ok(resource)
    }

    fn lookup(&self, id: &str) -> Option<Arc<Resource>> {
        self.registry.get(id)
    }

    fn resource_count(&self) -> usize {
        self.registry.len()
    }

    fn clear(&self) {
        self.registry.clear();
    }
}
