//! Node keys and paths.

use serde::{Serialize, Serializer};
use std::fmt;

/// Key of a node relative to its parent.
///
/// On a map node an `Int` key is a non-string map key; on a list node it is
/// the element index. Integers order before names so sorted maps list
/// numeric keys first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKey {
    Int(i64),
    Name(String),
}

impl NodeKey {
    /// The key as a list index, if it is a non-negative integer.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            NodeKey::Int(i) => usize::try_from(*i).ok(),
            NodeKey::Name(_) => None,
        }
    }

    /// Whether this key is a string name.
    pub fn is_name(&self) -> bool {
        matches!(self, NodeKey::Name(_))
    }

    /// Key for a list element at `index`.
    pub(crate) fn index(index: usize) -> Self {
        NodeKey::Int(index as i64)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(i) => write!(f, "{}", i),
            NodeKey::Name(name) => f.write_str(name),
        }
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeKey::Int(i) => serializer.serialize_i64(*i),
            NodeKey::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl From<&str> for NodeKey {
    fn from(name: &str) -> Self {
        NodeKey::Name(name.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(name: String) -> Self {
        NodeKey::Name(name)
    }
}

impl From<&String> for NodeKey {
    fn from(name: &String) -> Self {
        NodeKey::Name(name.clone())
    }
}

impl From<&NodeKey> for NodeKey {
    fn from(key: &NodeKey) -> Self {
        key.clone()
    }
}

impl From<i64> for NodeKey {
    fn from(i: i64) -> Self {
        NodeKey::Int(i)
    }
}

impl From<i32> for NodeKey {
    fn from(i: i32) -> Self {
        NodeKey::Int(i64::from(i))
    }
}

impl From<usize> for NodeKey {
    fn from(i: usize) -> Self {
        NodeKey::index(i)
    }
}

/// Build a path from mixed name and index keys.
///
/// ```
/// use cfgtree::{node::ConfigurationNode, path};
///
/// let mut root = ConfigurationNode::root();
/// root.set(path!["servers", 0, "host"], "example.org");
/// assert_eq!(root.get(path!["servers", 0, "host"]).get_string(""), "example.org");
/// ```
#[macro_export]
macro_rules! path {
    ($($key:expr),+ $(,)?) => {
        [$($crate::node::NodeKey::from($key)),+]
    };
}

/// Collect any iterable of key-like items into a path.
pub(crate) fn to_path<I, K>(path: I) -> Vec<NodeKey>
where
    I: IntoIterator<Item = K>,
    K: Into<NodeKey>,
{
    path.into_iter().map(Into::into).collect()
}

/// Render a path for messages, e.g. `server.ports.0`.
pub fn display_path(path: &[NodeKey]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
