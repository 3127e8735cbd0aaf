//! Thread-safe registry access
//!
//! The registry itself is single-threaded. Embedders that need to reach it
//! from several threads share a [`SharedRegistry`]: every call runs under one
//! exclusive lock, so no thread can observe a list shift, map update or queue
//! resize half-way through.

use crate::registry::Registry;
use ember_config::CollectionsConfig;
use parking_lot::Mutex;
use std::sync::Arc;

/// Clonable handle to one registry guarded by a single lock.
///
/// All clones refer to the same registry.
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry(Arc<Mutex<Registry>>);

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        SharedRegistry(Arc::new(Mutex::new(registry)))
    }

    pub fn with_config(config: &CollectionsConfig) -> Self {
        Self::new(Registry::with_config(config))
    }

    /// Acquire the lock and apply a read function.
    pub fn with<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        let guard = self.0.lock();
        f(&guard)
    }

    /// Acquire the lock and apply a mutation function.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        let mut guard = self.0.lock();
        f(&mut guard)
    }
}
