//! Content mount: text and bytes held in memory

use super::{Mount, normalize_prefix};
use crate::core::content::{Content, CreateOptions};
use crate::core::mime::normalize_extension;
use crate::core::registry::ResourceRegistry;
use crate::core::resource::{Resource, Source};
use crate::utils::error::{ProviderError, Result};
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Default URL prefix for in-memory resources
pub const DEFAULT_CONTENT_PREFIX: &str = "/contents";

const DEFAULT_TEXT_EXTENSION: &str = ".txt";
const DEFAULT_BYTES_EXTENSION: &str = ".bin";

#[derive(Debug)]
pub struct ContentMount {
    prefix: String,
    registry: ResourceRegistry,
}

impl ContentMount {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_prefix(prefix.as_ref()),
            registry: ResourceRegistry::new(),
        }
    }
}

impl Default for ContentMount {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_PREFIX)
    }
}

impl Mount for ContentMount {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn handles(&self, content: &Content) -> bool {
        content.is_in_memory()
    }

    fn register(&self, content: Content, options: &CreateOptions) -> Result<Arc<Resource>> {
        let (bytes, default_extension) = match content {
            Content::Text(text) => (Bytes::from(text), DEFAULT_TEXT_EXTENSION),
            Content::Bytes(bytes) => (bytes, DEFAULT_BYTES_EXTENSION),
            Content::Path(path) => {
                return Err(ProviderError::unhandled_input(format!(
                    "path {}",
                    path.display()
                )));
            }
        };

        let extension = options
            .extension
            .as_deref()
            .map(normalize_extension)
            .unwrap_or_else(|| default_extension.to_string());
        let size = bytes.len();

        let resource = self.registry.register(&extension, |id| {
            Resource::new(
                id,
                Source::Memory {
                    bytes,
                    extension: extension.clone(),
                },
                options.headers.clone(),
            )
        });

        debug!(
            mount = %self.prefix,
            id = %resource.id(),
            size,
            "Registered in-memory resource"
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
