//! Opaque collection handles and collection kinds

use std::fmt;

/// Opaque identifier of one live collection inside a [`Registry`](crate::registry::Registry).
///
/// Handles are plain numbers so scripts can store them in variables and in
/// other collections. A handle says nothing about the kind of collection it
/// names; the registry checks that on every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub const fn new(id: u64) -> Self {
        Handle(id)
    }

    /// Numeric value of the handle as seen by scripts
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl From<u64> for Handle {
    fn from(id: u64) -> Self {
        Handle(id)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The category of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Map,
    Queue,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] =
        [CollectionKind::List, CollectionKind::Map, CollectionKind::Queue];

    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::List => "list",
            CollectionKind::Map => "map",
            CollectionKind::Queue => "queue",
        }
    }

    /// Look up a kind by its script-facing name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Numeric code used by legacy scripts (list = 0, map = 1, queue = 2)
    pub fn code(self) -> u8 {
        match self {
            CollectionKind::List => 0,
            CollectionKind::Map => 1,
            CollectionKind::Queue => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display() {
        assert_eq!(Handle::new(42).to_string(), "#42");
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in CollectionKind::ALL {
            assert_eq!(CollectionKind::from_name(kind.name()), Some(kind));
            assert_eq!(CollectionKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(CollectionKind::from_name("stack"), None);
        assert_eq!(CollectionKind::from_code(3), None);
    }
}
