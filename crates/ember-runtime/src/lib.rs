//! Ember Runtime - handle-indexed collections for engine scripts
//!
//! This library provides the collection subsystem behind the engine's
//! scripting surface:
//! - A registry issuing opaque handles to dynamically created collections
//! - Ordered lists, ordered-iteration maps and circular-buffer queues
//! - A lock-guarded registry for multi-threaded embedders
//! - Name-dispatched `ds_*` builtins for the script interpreter
//!
//! # Example
//!
//! ```
//! use ember_runtime::Registry;
//!
//! let mut registry = Registry::new();
//! let list = registry.create_list().unwrap();
//! registry.list_add(list, 10).unwrap();
//! registry.list_add(list, 20).unwrap();
//! registry.list_insert(list, 1, 15).unwrap();
//! assert_eq!(registry.list_find_value(list, 1).unwrap(), 15.into());
//! ```

/// Ember runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builtins;
pub mod collections;
pub mod handle;
pub mod registry;
pub mod shared;
pub mod value;

// Re-export commonly used types
pub use builtins::{call_builtin, is_builtin};
pub use collections::{Collection, DsList, DsMap, DsQueue, MapKey};
pub use ember_config::CollectionsConfig;
pub use handle::{CollectionKind, Handle};
pub use registry::Registry;
pub use shared::SharedRegistry;
pub use value::{RuntimeError, RuntimeResult, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}
