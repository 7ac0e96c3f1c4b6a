//! Hierarchical addresses in the protocol namespace.

use std::fmt;

/// The address of one object in the wire protocol's namespace,
/// e.g. `/dev0/serv0/char1`.
///
/// Child segments are `<tag><index>` where the index is the count of
/// previously attached children of that tag under the same parent.
/// Indices are monotonic and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Wrap an already-formed path string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The namespace root, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// A top-level path, `/<tag><index>`.
    pub fn top_level(tag: &str, index: u32) -> Self {
        Self(format!("/{}{}", tag, index))
    }

    /// Derive the address of a child of this path.
    pub fn child(&self, tag: &str, index: u32) -> Self {
        Self(format!("{}/{}{}", self.0, tag, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}
