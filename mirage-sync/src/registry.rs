//! The store registry: explicit cross-type wiring.
//!
//! One registry exists per mirrored API. It holds a store façade per
//! resource type and is the only path by which one type's response data
//! reaches another type's store: side-loaded records and relationship
//! edges are dispatched through it, never by reaching into another store's
//! internals.

use crate::store::ResourceStore;
use crate::transport::Transport;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Registry mapping resource-type names to their store façades.
///
/// Constructed once at startup and passed by reference to anything needing
/// cross-type access; there is no process-wide ambient registry.
#[derive(Clone)]
pub struct StoreRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
pub(crate) struct RegistryInner {
    stores: RwLock<HashMap<String, Arc<ResourceStore>>>,
}

impl StoreRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner::default()),
        }
    }

    /// Registers a resource type, creating its store façade. Registering
    /// the same name twice replaces the previous store.
    pub fn register(
        &self,
        resource_type: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Arc<ResourceStore> {
        let resource_type = resource_type.into();
        let store = Arc::new(ResourceStore::new(
            resource_type.clone(),
            transport,
            Arc::downgrade(&self.inner),
        ));
        debug!(resource_type = %resource_type, "registered store");
        self.inner
            .stores
            .write()
            .unwrap()
            .insert(resource_type, store.clone());
        store
    }

    /// The store registered under exactly `resource_type`.
    pub fn store(&self, resource_type: &str) -> Option<Arc<ResourceStore>> {
        self.inner.stores.read().unwrap().get(resource_type).cloned()
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryInner {
    /// Dispatch lookup tolerating naming drift between relationship names
    /// and registered type names: exact match first, then the naive plural.
    pub(crate) fn resolve_type(&self, name: &str) -> Option<Arc<ResourceStore>> {
        let stores = self.stores.read().unwrap();
        if let Some(store) = stores.get(name) {
            return Some(store.clone());
        }
        stores.get(&format!("{name}s")).cloned()
    }
}
