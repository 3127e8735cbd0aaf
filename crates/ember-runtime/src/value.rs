//! Runtime value representation
//!
//! Values stored in collections are opaque to the runtime:
//! - Numbers: IEEE 754 doubles (immediate)
//! - Strings: Heap-allocated, reference-counted (Arc<String>), immutable
//! - Handles: references to other live collections, stored by number
//! - Undefined: the "nothing here" result surfaced to scripts

use crate::handle::{CollectionKind, Handle};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Runtime value type
#[derive(Clone, Debug)]
pub enum Value {
    /// Numeric value (IEEE 754 double-precision)
    Number(f64),
    /// String value (reference-counted, immutable)
    String(Arc<String>),
    /// Handle to another collection
    Handle(Handle),
    /// Absence of a value
    Undefined,
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Handle(_) => "handle",
            Value::Undefined => "undefined",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Total order used when sorting lists.
    ///
    /// numbers < strings < handles < undefined. Numbers use IEEE total order,
    /// strings compare byte-wise, handles by id.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.as_str().cmp(b.as_str()),
            (Value::Handle(a), Value::Handle(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Number(_) => 0,
            Value::String(_) => 1,
            Value::Handle(_) => 2,
            Value::Undefined => 3,
        }
    }
}

impl PartialEq for Value {
    /// Content equality. Different variants are never equal; there is no
    /// coercion between numbers and strings.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Handle(a), Value::Handle(b)) => a == b,
            (Value::Undefined, Value::Undefined) => true,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::new(s))
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Handle(h)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                // Whole numbers print without a trailing .0
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Handle(h) => write!(f, "{}", h),
            Value::Undefined => write!(f, "undefined"),
        }
    }
}

/// Runtime error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Handle was never issued or has been destroyed
    #[error("Invalid handle: {handle}")]
    InvalidHandle { handle: Handle },
    /// Handle is live but names a different kind of collection
    #[error("Handle {handle} is a {found}, expected a {expected}")]
    KindMismatch {
        handle: Handle,
        expected: CollectionKind,
        found: CollectionKind,
    },
    /// List index outside the valid bounds
    #[error("Index {index} out of range for list of size {len}")]
    IndexOutOfRange { index: i64, len: usize },
    /// dequeue/head/tail on an empty queue
    #[error("Queue {handle} is empty")]
    EmptyQueue { handle: Handle },
    /// The registry has issued every representable handle
    #[error("Handle space exhausted")]
    HandleSpaceExhausted,
    /// Wrong number of arguments to a script builtin
    #[error("{function} expects {expected} argument(s), got {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
    /// Argument of the wrong shape passed to a script builtin
    #[error("{function}: {msg}")]
    InvalidArgument { function: String, msg: String },
    /// Unknown script builtin
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },
}

/// Result alias used throughout the runtime
pub type RuntimeResult<T> = Result<T, RuntimeError>;
