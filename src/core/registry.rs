//! Per-mount resource registry
//!
//! Lookups take a shared lock and may run concurrently with each other.
//! Registrations take the exclusive lock, so id allocation and insertion are
//! one step and a resource becomes visible only once it is fully built.

use crate::core::resource::Resource;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: RwLock<HashMap<String, Arc<Resource>>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id ending in `suffix` and register the resource built
    /// for it.
    pub fn register<F>(&self, suffix: &str, build: F) -> Arc<Resource>
    where
        F: FnOnce(String) -> Resource,
    {
        let mut resources = self.resources.write();

        let mut id = generate_id(suffix);
        while resources.contains_key(&id) {
            id = generate_id(suffix);
        }

        let resource = Arc::new(build(id.clone()));
        resources.insert(id, Arc::clone(&resource));
        resource
    }

    pub fn get(&self, id: &str) -> Option<Arc<Resource>> {
        self.resources.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.resources.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().is_empty()
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.resources.write().clear();
    }
}

/// Random token, optionally followed by an extension so URLs keep a
/// meaningful suffix.
fn generate_id(suffix: &str) -> String {
    format!("{}{}", Uuid::new_v4().simple(), suffix)
}
