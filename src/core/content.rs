//! Registration inputs
//!
//! `Content` is what a caller hands to `Provider::create`. Each mount decides
//! from the variant (and, for paths, from the filesystem) whether it accepts.

use bytes::Bytes;
use std::fmt;
use std::path::{Path, PathBuf};

/// Content to register with a provider
#[derive(Clone, PartialEq, Eq)]
pub enum Content {
    /// A file or directory on disk
    Path(PathBuf),
    /// Text held in memory
    Text(String),
    /// Raw bytes held in memory
    Bytes(Bytes),
}

impl Content {
    /// Short description used in errors and logs; never includes payloads.
    pub fn describe(&self) -> String {
        match self {
            Content::Path(path) => format!("path {}", path.display()),
            Content::Text(text) => format!("text ({} bytes)", text.len()),
            Content::Bytes(bytes) => format!("bytes ({} bytes)", bytes.len()),
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Content::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Whether this is in-memory content rather than a filesystem reference
    pub fn is_in_memory(&self) -> bool {
        matches!(self, Content::Text(_) | Content::Bytes(_))
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<PathBuf> for Content {
    fn from(path: PathBuf) -> Self {
        Content::Path(path)
    }
}

impl From<&Path> for Content {
    fn from(path: &Path) -> Self {
        Content::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for Content {
    fn from(path: &PathBuf) -> Self {
        Content::Path(path.clone())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Content::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Bytes> for Content {
    fn from(bytes: Bytes) -> Self {
        Content::Bytes(bytes)
    }
}

/// Options accepted by `Provider::create_with`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Extension used for content typing of in-memory content, e.g. `.csv`
    pub extension: Option<String>,
    /// Extra headers sent with every response for the resource
    pub headers: Vec<(String, String)>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
