//! Handle registry
//!
//! Owns every live collection and the mapping from opaque [`Handle`]s to them.
//! All collection operations go through here: the handle is resolved and its
//! kind checked, then the operation runs on the resolved instance.
//!
//! Handles come from a monotonically increasing counter. A destroyed handle's
//! number is never issued again by the same registry, so a stale handle can
//! only ever fail with [`RuntimeError::InvalidHandle`].

use crate::collections::{Collection, DsList, DsMap, DsQueue, MapKey};
use crate::handle::{CollectionKind, Handle};
use crate::value::{RuntimeError, RuntimeResult, Value};
use ember_config::CollectionsConfig;
use std::collections::HashMap;
use tracing::debug;

/// Owner of all handle-addressed collections
#[derive(Debug, Clone)]
pub struct Registry {
    slots: HashMap<Handle, Collection>,
    /// Next id to issue; `None` once the id space is used up
    next_id: Option<u64>,
    config: CollectionsConfig,
}

impl Registry {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::with_config(&CollectionsConfig::default())
    }

    /// Create an empty registry
    pub fn with_config(config: &CollectionsConfig) -> Self {
        Self {
            slots: HashMap::new(),
            next_id: Some(config.registry.first_handle),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &CollectionsConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Allocate a new empty collection of `kind`
    pub fn create(&mut self, kind: CollectionKind) -> RuntimeResult<Handle> {
        let collection = match kind {
            CollectionKind::List => Collection::List(DsList::new()),
            CollectionKind::Map => Collection::Map(DsMap::new()),
            CollectionKind::Queue => Collection::Queue(DsQueue::with_config(&self.config.queue)),
        };
        let handle = self.allocate(collection)?;
        debug!(%handle, %kind, "created collection");
        Ok(handle)
    }

    pub fn create_list(&mut self) -> RuntimeResult<Handle> {
        self.create(CollectionKind::List)
    }

    pub fn create_map(&mut self) -> RuntimeResult<Handle> {
        self.create(CollectionKind::Map)
    }

    pub fn create_queue(&mut self) -> RuntimeResult<Handle> {
        self.create(CollectionKind::Queue)
    }

    /// Release the collection and invalidate its handle
    pub fn destroy(&mut self, handle: Handle) -> RuntimeResult<()> {
        let collection = self
            .slots
            .remove(&handle)
            .ok_or(RuntimeError::InvalidHandle { handle })?;
        debug!(%handle, kind = %collection.kind(), "destroyed collection");
        Ok(())
    }

    /// Create a new handle holding an independent copy of `source`
    pub fn copy(&mut self, source: Handle) -> RuntimeResult<Handle> {
        let duplicate = self.slot(source)?.clone();
        let kind = duplicate.kind();
        let handle = self.allocate(duplicate)?;
        debug!(%source, %handle, %kind, "copied collection");
        Ok(handle)
    }

    /// Replace the contents of `dest` with a copy of `source`.
    ///
    /// Both handles must be live and of the same kind.
    pub fn copy_into(&mut self, dest: Handle, source: Handle) -> RuntimeResult<()> {
        let duplicate = self.slot(source)?.clone();
        let target = self.slot_mut(dest)?;
        if target.kind() != duplicate.kind() {
            return Err(RuntimeError::KindMismatch {
                handle: dest,
                expected: duplicate.kind(),
                found: target.kind(),
            });
        }
        *target = duplicate;
        debug!(%source, %dest, "copied collection contents");
        Ok(())
    }

    fn allocate(&mut self, collection: Collection) -> RuntimeResult<Handle> {
        let id = self.next_id.ok_or(RuntimeError::HandleSpaceExhausted)?;
        self.next_id = id.checked_add(1);
        let handle = Handle::new(id);
        self.slots.insert(handle, collection);
        Ok(handle)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve `handle` to its collection, checking the kind
    pub fn resolve(
        &mut self,
        handle: Handle,
        expected: CollectionKind,
    ) -> RuntimeResult<&mut Collection> {
        let collection = self.slot_mut(handle)?;
        check_kind(handle, expected, collection)?;
        Ok(collection)
    }

    /// Read-only counterpart of [`Registry::resolve`]
    pub fn get(&self, handle: Handle, expected: CollectionKind) -> RuntimeResult<&Collection> {
        let collection = self.slot(handle)?;
        check_kind(handle, expected, collection)?;
        Ok(collection)
    }

    pub fn list(&self, handle: Handle) -> RuntimeResult<&DsList> {
        match self.slot(handle)? {
            Collection::List(list) => Ok(list),
            other => Err(mismatch(handle, CollectionKind::List, other)),
        }
    }

    pub fn resolve_list(&mut self, handle: Handle) -> RuntimeResult<&mut DsList> {
        match self.slot_mut(handle)? {
            Collection::List(list) => Ok(list),
            other => Err(mismatch(handle, CollectionKind::List, other)),
        }
    }

    pub fn map(&self, handle: Handle) -> RuntimeResult<&DsMap> {
        match self.slot(handle)? {
            Collection::Map(map) => Ok(map),
            other => Err(mismatch(handle, CollectionKind::Map, other)),
        }
    }

    pub fn resolve_map(&mut self, handle: Handle) -> RuntimeResult<&mut DsMap> {
        match self.slot_mut(handle)? {
            Collection::Map(map) => Ok(map),
            other => Err(mismatch(handle, CollectionKind::Map, other)),
        }
    }

    pub fn queue(&self, handle: Handle) -> RuntimeResult<&DsQueue> {
        match self.slot(handle)? {
            Collection::Queue(queue) => Ok(queue),
            other => Err(mismatch(handle, CollectionKind::Queue, other)),
        }
    }

    pub fn resolve_queue(&mut self, handle: Handle) -> RuntimeResult<&mut DsQueue> {
        match self.slot_mut(handle)? {
            Collection::Queue(queue) => Ok(queue),
            other => Err(mismatch(handle, CollectionKind::Queue, other)),
        }
    }

    fn slot(&self, handle: Handle) -> RuntimeResult<&Collection> {
        self.slots
            .get(&handle)
            .ok_or(RuntimeError::InvalidHandle { handle })
    }

    fn slot_mut(&mut self, handle: Handle) -> RuntimeResult<&mut Collection> {
        self.slots
            .get_mut(&handle)
            .ok_or(RuntimeError::InvalidHandle { handle })
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Whether `handle` is live and names a collection of `kind`
    pub fn exists(&self, handle: Handle, kind: CollectionKind) -> bool {
        self.kind_of(handle) == Some(kind)
    }

    pub fn kind_of(&self, handle: Handle) -> Option<CollectionKind> {
        self.slots.get(&handle).map(Collection::kind)
    }

    /// Number of live collections
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    /// Live handles in ascending order
    pub fn handles(&self) -> Vec<Handle> {
        let mut handles: Vec<Handle> = self.slots.keys().copied().collect();
        handles.sort_unstable();
        handles
    }

    /// Element count of any kind of collection
    pub fn size(&self, handle: Handle) -> RuntimeResult<usize> {
        Ok(self.slot(handle)?.len())
    }

    pub fn empty(&self, handle: Handle) -> RuntimeResult<bool> {
        Ok(self.slot(handle)?.is_empty())
    }

    /// Empty any kind of collection; the handle stays valid
    pub fn clear(&mut self, handle: Handle) -> RuntimeResult<()> {
        self.slot_mut(handle)?.clear();
        Ok(())
    }

    // ========================================================================
    // List operations
    // ========================================================================

    pub fn list_add(&mut self, handle: Handle, value: impl Into<Value>) -> RuntimeResult<()> {
        self.resolve_list(handle)?.add(value.into());
        Ok(())
    }

    pub fn list_insert(
        &mut self,
        handle: Handle,
        index: usize,
        value: impl Into<Value>,
    ) -> RuntimeResult<()> {
        self.resolve_list(handle)?.insert(index, value.into())
    }

    pub fn list_delete(&mut self, handle: Handle, index: usize) -> RuntimeResult<Value> {
        self.resolve_list(handle)?.delete(index)
    }

    pub fn list_replace(
        &mut self,
        handle: Handle,
        index: usize,
        value: impl Into<Value>,
    ) -> RuntimeResult<Value> {
        self.resolve_list(handle)?.replace(index, value.into())
    }

    pub fn list_find_value(&self, handle: Handle, index: usize) -> RuntimeResult<Value> {
        self.list(handle)?.find_value(index).cloned()
    }

    pub fn list_find_index(
        &self,
        handle: Handle,
        value: impl Into<Value>,
    ) -> RuntimeResult<Option<usize>> {
        Ok(self.list(handle)?.find_index(&value.into()))
    }

    pub fn list_sort(&mut self, handle: Handle, ascending: bool) -> RuntimeResult<()> {
        self.resolve_list(handle)?.sort(ascending);
        Ok(())
    }

    // ========================================================================
    // Map operations
    // ========================================================================

    /// Insert only if the key is absent; returns whether it was inserted
    pub fn map_add(
        &mut self,
        handle: Handle,
        key: impl Into<MapKey>,
        value: impl Into<Value>,
    ) -> RuntimeResult<bool> {
        Ok(self.resolve_map(handle)?.add(key.into(), value.into()))
    }

    pub fn map_set(
        &mut self,
        handle: Handle,
        key: impl Into<MapKey>,
        value: impl Into<Value>,
    ) -> RuntimeResult<()> {
        self.resolve_map(handle)?.set(key.into(), value.into());
        Ok(())
    }

    /// Overwrite only if the key is present; returns whether it was
    pub fn map_replace(
        &mut self,
        handle: Handle,
        key: impl Into<MapKey>,
        value: impl Into<Value>,
    ) -> RuntimeResult<bool> {
        Ok(self.resolve_map(handle)?.replace(&key.into(), value.into()))
    }

    pub fn map_find_value(
        &self,
        handle: Handle,
        key: impl Into<MapKey>,
    ) -> RuntimeResult<Option<Value>> {
        Ok(self.map(handle)?.find_value(&key.into()).cloned())
    }

    pub fn map_exists(&self, handle: Handle, key: impl Into<MapKey>) -> RuntimeResult<bool> {
        Ok(self.map(handle)?.exists(&key.into()))
    }

    pub fn map_delete(&mut self, handle: Handle, key: impl Into<MapKey>) -> RuntimeResult<()> {
        self.resolve_map(handle)?.delete(&key.into());
        Ok(())
    }

    pub fn map_find_first(&self, handle: Handle) -> RuntimeResult<Option<MapKey>> {
        Ok(self.map(handle)?.find_first().cloned())
    }

    pub fn map_find_last(&self, handle: Handle) -> RuntimeResult<Option<MapKey>> {
        Ok(self.map(handle)?.find_last().cloned())
    }

    pub fn map_find_next(
        &self,
        handle: Handle,
        key: impl Into<MapKey>,
    ) -> RuntimeResult<Option<MapKey>> {
        Ok(self.map(handle)?.find_next(&key.into()).cloned())
    }

    pub fn map_find_previous(
        &self,
        handle: Handle,
        key: impl Into<MapKey>,
    ) -> RuntimeResult<Option<MapKey>> {
        Ok(self.map(handle)?.find_previous(&key.into()).cloned())
    }

    // ========================================================================
    // Queue operations
    // ========================================================================

    pub fn queue_enqueue(&mut self, handle: Handle, value: impl Into<Value>) -> RuntimeResult<()> {
        self.resolve_queue(handle)?.enqueue(value.into());
        Ok(())
    }

    pub fn queue_dequeue(&mut self, handle: Handle) -> RuntimeResult<Value> {
        self.resolve_queue(handle)?
            .dequeue()
            .ok_or(RuntimeError::EmptyQueue { handle })
    }

    pub fn queue_head(&self, handle: Handle) -> RuntimeResult<Value> {
        self.queue(handle)?
            .head()
            .cloned()
            .ok_or(RuntimeError::EmptyQueue { handle })
    }

    pub fn queue_tail(&self, handle: Handle) -> RuntimeResult<Value> {
        self.queue(handle)?
            .tail()
            .cloned()
            .ok_or(RuntimeError::EmptyQueue { handle })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn check_kind(
    handle: Handle,
    expected: CollectionKind,
    collection: &Collection,
) -> RuntimeResult<()> {
    if collection.kind() == expected {
        Ok(())
    } else {
        Err(mismatch(handle, expected, collection))
    }
}

fn mismatch(handle: Handle, expected: CollectionKind, found: &Collection) -> RuntimeError {
    RuntimeError::KindMismatch {
        handle,
        expected,
        found: found.kind(),
    }
}
