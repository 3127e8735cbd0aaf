//! Collection kinds managed by the handle registry

pub mod list;
pub mod map;
pub mod queue;

pub use list::DsList;
pub use map::{DsMap, MapKey};
pub use queue::DsQueue;

use crate::handle::CollectionKind;

/// One live collection instance owned by the registry
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    List(DsList),
    Map(DsMap),
    Queue(DsQueue),
}

impl Collection {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Collection::List(_) => CollectionKind::List,
            Collection::Map(_) => CollectionKind::Map,
            Collection::Queue(_) => CollectionKind::Queue,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::List(list) => list.len(),
            Collection::Map(map) => map.len(),
            Collection::Queue(queue) => queue.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty the collection in place
    pub fn clear(&mut self) {
        match self {
            Collection::List(list) => list.clear(),
            Collection::Map(map) => map.clear(),
            Collection::Queue(queue) => queue.clear(),
        }
    }
}
