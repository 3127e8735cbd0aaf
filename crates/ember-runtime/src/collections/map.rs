//! Ordered map - key/value store with a deterministic key order
//!
//! Keys are numbers or strings, mixed freely within one map. The total order
//! used by the cursor operations is:
//! - every numeric key before every string key
//! - numbers ascending (-0.0 is stored as 0.0, all NaNs are one key sorting last among numbers)
//! - strings byte-wise lexicographic
//!
//! Cursor operations are pure functions of the current key set, so a key that
//! has been deleted still has a well-defined successor and predecessor: the
//! nearest present keys on either side of where it would sit.

use crate::handle::Handle;
use crate::value::Value;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::Arc;

/// Key of an ordered map
///
/// Variant order matters: the derived `Ord` puts numbers before strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Number(OrderedFloat<f64>),
    String(Arc<String>),
}

impl MapKey {
    pub fn number(n: f64) -> Self {
        // One key for 0.0/-0.0 and one for every NaN payload
        let canonical = if n.is_nan() {
            f64::NAN
        } else if n == 0.0 {
            0.0
        } else {
            n
        };
        MapKey::Number(OrderedFloat(canonical))
    }

    pub fn string(s: impl Into<String>) -> Self {
        MapKey::String(Arc::new(s.into()))
    }

    /// Convert a stored value into a key.
    ///
    /// Handles key by their numeric id. `Undefined` is not a key.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(MapKey::number(*n)),
            Value::String(s) => Some(MapKey::String(Arc::clone(s))),
            Value::Handle(h) => Some(MapKey::number(h.id() as f64)),
            Value::Undefined => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Number(n) => Value::Number(n.0),
            MapKey::String(s) => Value::String(Arc::clone(s)),
        }
    }
}

impl From<f64> for MapKey {
    fn from(n: f64) -> Self {
        MapKey::number(n)
    }
}

impl From<i32> for MapKey {
    fn from(n: i32) -> Self {
        MapKey::number(f64::from(n))
    }
}

impl From<Handle> for MapKey {
    fn from(handle: Handle) -> Self {
        MapKey::number(handle.id() as f64)
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::string(s)
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::String(Arc::new(s))
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Key/value store with ordered cursor traversal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DsMap {
    inner: BTreeMap<MapKey, Value>,
}

impl DsMap {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    /// Insert only if `key` is absent. Returns whether the insert happened.
    pub fn add(&mut self, key: MapKey, value: Value) -> bool {
        if self.inner.contains_key(&key) {
            return false;
        }
        self.inner.insert(key, value);
        true
    }

    /// Insert or overwrite. Returns the previous value, if any.
    pub fn set(&mut self, key: MapKey, value: Value) -> Option<Value> {
        self.inner.insert(key, value)
    }

    /// Overwrite only if `key` is present. Returns whether it was.
    pub fn replace(&mut self, key: &MapKey, value: Value) -> bool {
        match self.inner.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn find_value(&self, key: &MapKey) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn exists(&self, key: &MapKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Remove `key` if present; absent keys are ignored.
    pub fn delete(&mut self, key: &MapKey) -> Option<Value> {
        self.inner.remove(key)
    }

    pub fn find_first(&self) -> Option<&MapKey> {
        self.inner.keys().next()
    }

    pub fn find_last(&self) -> Option<&MapKey> {
        self.inner.keys().next_back()
    }

    /// Smallest present key strictly greater than `key`
    pub fn find_next(&self, key: &MapKey) -> Option<&MapKey> {
        self.inner
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(k, _)| k)
    }

    /// Largest present key strictly less than `key`
    pub fn find_previous(&self, key: &MapKey) -> Option<&MapKey> {
        self.inner.range(..key).next_back().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Keys in traversal order
    pub fn keys(&self) -> Vec<MapKey> {
        self.inner.keys().cloned().collect()
    }

    /// Values in key order
    pub fn values(&self) -> Vec<Value> {
        self.inner.values().cloned().collect()
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, MapKey, Value> {
        self.inner.iter()
    }
}
