//! Core content-serving logic
//!
//! Everything here is independent of the HTTP layer: content typing,
//! registration inputs, resources, registries and mount dispatch.

pub mod content;
pub mod mime;
pub mod mount;
pub mod registry;
pub mod resource;

pub use content::{Content, CreateOptions};
pub use mount::{ContentMount, FileMount, Mount, MountTable};
pub use resource::{Body, Resolved, Resource, ResourceKind, Source};
