//! Servable resources
//!
//! A resource is created once by its mount and never mutated afterwards.
//! File-backed resources only record paths, so every request reads the file
//! as it currently is on disk.

use crate::core::mime::{self, DEFAULT_TEXT_TYPE};
use bytes::Bytes;
use mime_guess::Mime;
use serde::Serialize;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// The kind of content a resource serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    SingleFile,
    DirectoryTree,
    InMemory,
}

/// Where a resource's bytes come from
#[derive(Debug, Clone)]
pub enum Source {
    /// Absolute path of a single file
    File(PathBuf),
    /// Canonical root of a directory tree
    Directory(PathBuf),
    /// Owned bytes plus the extension used for typing
    Memory { bytes: Bytes, extension: String },
}

/// A registered resource
#[derive(Debug, Clone)]
pub struct Resource {
    id: String,
    source: Source,
    headers: Vec<(String, String)>,
}

/// Response body for a resolved request
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Stream this file from disk
    File(PathBuf),
    /// Send these bytes verbatim
    Bytes(Bytes),
}

/// Outcome of resolving a request against a resource
#[derive(Debug, Clone)]
pub struct Resolved {
    pub body: Body,
    pub content_type: Mime,
    pub headers: Vec<(String, String)>,
}

impl Resource {
    pub fn new(id: String, source: Source, headers: Vec<(String, String)>) -> Self {
        Self {
            id,
            source,
            headers,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ResourceKind {
        match self.source {
            Source::File(_) => ResourceKind::SingleFile,
            Source::Directory(_) => ResourceKind::DirectoryTree,
            Source::Memory { .. } => ResourceKind::InMemory,
        }
    }

    /// Resolve the part of the request path that follows the resource id.
    ///
    /// `Ok(None)` means not found. Errors are real I/O faults while probing
    /// the filesystem.
    pub fn resolve(&self, subpath: &str) -> io::Result<Option<Resolved>> {
        let subpath = subpath.trim_start_matches('/');

        let (body, content_type) = match &self.source {
            Source::File(path) => {
                if !subpath.is_empty() {
                    return Ok(None);
                }
                (Body::File(path.clone()), mime::content_type_for_path(path))
            }
            Source::Directory(root) => {
                let Some(path) = safe_join(root, subpath)? else {
                    return Ok(None);
                };
                let content_type = mime::content_type_for_path(&path);
                (Body::File(path), content_type)
            }
            Source::Memory { bytes, extension } => {
                if !subpath.is_empty() {
                    return Ok(None);
                }
                (
                    Body::Bytes(bytes.clone()),
                    mime::content_type_for(extension, DEFAULT_TEXT_TYPE),
                )
            }
        };

        Ok(Some(Resolved {
            body,
            content_type,
            headers: self.headers.clone(),
        }))
    }
}

/// Join a request subpath onto a canonical directory root.
///
/// Returns `Ok(None)` for anything that is not a regular file strictly inside
/// `root`: parent segments, absolute or drive-prefixed segments, symlinks that
/// lead outside the root, missing files and directories.
pub fn safe_join(root: &Path, subpath: &str) -> io::Result<Option<PathBuf>> {
    let mut relative = PathBuf::new();
    for segment in subpath.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains('\\') {
            return Ok(None);
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => relative.push(part),
            _ => return Ok(None),
        }
    }

    if relative.as_os_str().is_empty() {
        return Ok(None);
    }

    let canonical = match root.join(&relative).canonicalize() {
        Ok(path) => path,
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if !canonical.starts_with(root) {
        warn!(
            subpath = %subpath,
            "Rejected request resolving outside of its directory resource"
        );
        return Ok(None);
    }

    if !canonical.is_file() {
        return Ok(None);
    }

    Ok(Some(canonical))
}
