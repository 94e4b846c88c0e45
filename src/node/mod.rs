//! The configuration node tree.
//!
//! A [`ConfigurationNode`] holds exactly one of null, a scalar, a list of
//! nodes or a map of keyed nodes, plus an optional comment. Children are
//! owned by their parent; the non-owning link back to the parent is the
//! node's path, so the parent of any node is the node at `parent_path()`.
//!
//! Reads never change the tree: [`ConfigurationNode::get`] hands back a
//! *virtual* node for a missing path. Writes materialize missing map nodes
//! along the way ([`ConfigurationNode::set`]).
//!
//! ```
//! use cfgtree::node::ConfigurationNode;
//!
//! let mut root = ConfigurationNode::root();
//! root.set(["server", "port"], 8080);
//!
//! assert_eq!(root.get(["server", "port"]).get_int(0), 8080);
//! assert!(root.get(["server", "host"]).is_virtual());
//! assert_eq!(root.get(["server", "host"]).get_string("localhost"), "localhost");
//! ```

mod coerce;
mod key;
mod mapping;
mod value;
mod visit;

#[cfg(test)]
mod tests;

pub use coerce::FromNode;
pub use key::{NodeKey, display_path};
pub(crate) use mapping::NodeSeed;
pub use value::{NodeType, Scalar, Value};
pub use visit::NodeVisitor;

use crate::error::{ConfigError, Result};
use crate::options::{MapOrdering, NodeOptions};
use std::borrow::Cow;
use std::sync::Arc;

/// Whether a node is part of a tree or a placeholder for a missing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attachment {
    Attached,
    Virtual,
}

/// The value slot of a node.
#[derive(Debug, Clone)]
enum NodeValue {
    Scalar(Scalar),
    List(Vec<ConfigurationNode>),
    Map(Vec<ConfigurationNode>),
}

impl Default for NodeValue {
    fn default() -> Self {
        NodeValue::Scalar(Scalar::Null)
    }
}

/// One value in a configuration tree.
///
/// Equality compares values only: scalars by value, lists element-wise in
/// order, maps by key set and per-key value regardless of order. Comments,
/// paths and options are ignored.
#[derive(Debug, Clone)]
pub struct ConfigurationNode {
    path: Vec<NodeKey>,
    value: NodeValue,
    comment: Option<String>,
    options: Arc<NodeOptions>,
    attachment: Attachment,
}

impl ConfigurationNode {
    /// Create an empty root node with default options.
    pub fn root() -> Self {
        Self::root_with(Arc::new(NodeOptions::default()))
    }

    /// Create an empty root node sharing `options`.
    pub fn root_with(options: Arc<NodeOptions>) -> Self {
        Self::build(Vec::new(), NodeValue::default(), options, Attachment::Attached)
    }

    fn build(
        path: Vec<NodeKey>,
        value: NodeValue,
        options: Arc<NodeOptions>,
        attachment: Attachment,
    ) -> Self {
        Self {
            path,
            value,
            comment: None,
            options,
            attachment,
        }
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    pub fn options(&self) -> &Arc<NodeOptions> {
        &self.options
    }

    /// Keys from the root of the tree to this node.
    pub fn path(&self) -> &[NodeKey] {
        &self.path
    }

    /// This node's key in its parent, `None` for a root.
    pub fn key(&self) -> Option<&NodeKey> {
        self.path.last()
    }

    /// Path of the parent node, `None` for a root.
    pub fn parent_path(&self) -> Option<&[NodeKey]> {
        self.path.split_last().map(|(_, parent)| parent)
    }

    /// Whether this node is a placeholder for a path that does not exist.
    ///
    /// Writing to a virtual node changes only that node; it stays virtual
    /// until grafted with [`attach`](Self::attach) or `set_node`.
    pub fn is_virtual(&self) -> bool {
        self.attachment == Attachment::Virtual
    }

    pub fn node_type(&self) -> NodeType {
        match &self.value {
            NodeValue::Scalar(scalar) => scalar.node_type(),
            NodeValue::List(_) => NodeType::List,
            NodeValue::Map(_) => NodeType::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, NodeValue::Scalar(Scalar::Null))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.value, NodeValue::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.value, NodeValue::Map(_))
    }

    /// Null, or a list or map without children.
    pub fn is_empty(&self) -> bool {
        match &self.value {
            NodeValue::Scalar(scalar) => *scalar == Scalar::Null,
            NodeValue::List(children) | NodeValue::Map(children) => children.is_empty(),
        }
    }

    /// The scalar held by this node, if it is not a list or map.
    pub fn scalar(&self) -> Option<&Scalar> {
        match &self.value {
            NodeValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn clear_comment(&mut self) -> Option<String> {
        self.comment.take()
    }

    /// Elements of a list node; empty for any other type.
    pub fn children_list(&self) -> &[ConfigurationNode] {
        match &self.value {
            NodeValue::List(items) => items,
            _ => &[],
        }
    }

    /// Entries of a map node in their recorded order; empty for any other type.
    pub fn children_map(&self) -> impl Iterator<Item = (&NodeKey, &ConfigurationNode)> {
        let children: &[ConfigurationNode] = match &self.value {
            NodeValue::Map(children) => children,
            _ => &[],
        };
        children
            .iter()
            .filter_map(|child| child.key().map(|key| (key, child)))
    }

    /// Direct child by key, if attached.
    pub fn child(&self, key: &NodeKey) -> Option<&ConfigurationNode> {
        match &self.value {
            NodeValue::List(items) => key.as_index().and_then(|index| items.get(index)),
            NodeValue::Map(children) => children.iter().find(|c| c.key() == Some(key)),
            NodeValue::Scalar(_) => None,
        }
    }

    fn child_mut(&mut self, key: &NodeKey) -> Option<&mut ConfigurationNode> {
        match &mut self.value {
            NodeValue::List(items) => key.as_index().and_then(move |index| items.get_mut(index)),
            NodeValue::Map(children) => children.iter_mut().find(|c| c.path.last() == Some(key)),
            NodeValue::Scalar(_) => None,
        }
    }

    // ========================================================================
    // Path access
    // ========================================================================

    /// Look up the node at `path` relative to this node.
    ///
    /// Never modifies the tree. A missing path yields a virtual null node
    /// carrying the requested path; reading from it returns defaults.
    pub fn get<I, K>(&self, path: I) -> Cow<'_, ConfigurationNode>
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        let path = key::to_path(path);
        match self.lookup(&path) {
            Some(node) => Cow::Borrowed(node),
            None => {
                let mut full = self.path.clone();
                full.extend(path);
                Cow::Owned(Self::build(
                    full,
                    NodeValue::default(),
                    Arc::clone(&self.options),
                    Attachment::Virtual,
                ))
            }
        }
    }

    /// Mutable access to an existing node; never creates nodes.
    pub fn get_mut<I, K>(&mut self, path: I) -> Option<&mut ConfigurationNode>
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        let mut current = self;
        for key in path {
            current = current.child_mut(&key.into())?;
        }
        Some(current)
    }

    fn lookup(&self, path: &[NodeKey]) -> Option<&ConfigurationNode> {
        let mut current = self;
        for key in path {
            current = current.child(key)?;
        }
        Some(current)
    }

    /// Materialize `path` for writing and return the terminal node.
    ///
    /// Missing intermediate nodes become maps and a missing terminal node is
    /// created as null. An existing terminal value is left untouched.
    pub fn node_mut<I, K>(&mut self, path: I) -> &mut ConfigurationNode
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        let mut current = self;
        for key in path {
            current = current.child_or_insert(key.into());
        }
        current
    }

    /// Set the value at `path`, creating intermediate map nodes as needed.
    ///
    /// Any scalar met along the path is replaced by a map, and the terminal
    /// node's previous value (including children) is discarded.
    pub fn set<I, K, V>(&mut self, path: I, value: V) -> &mut ConfigurationNode
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
        V: Into<Value>,
    {
        self.node_mut(path).set_value(value)
    }

    /// Replace this node's value, inferring its type from the value's shape.
    ///
    /// The node's comment is kept; any previous children are dropped.
    pub fn set_value<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        self.value = match value.into() {
            Value::Null => NodeValue::Scalar(Scalar::Null),
            Value::Bool(b) => NodeValue::Scalar(Scalar::Bool(b)),
            Value::Int(i) => NodeValue::Scalar(Scalar::Int(i)),
            Value::Float(f) => NodeValue::Scalar(Scalar::Float(f)),
            Value::String(s) => NodeValue::Scalar(Scalar::String(s)),
            Value::List(items) => NodeValue::List(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let mut child = self.new_child(NodeKey::index(index));
                        child.set_value(item);
                        child
                    })
                    .collect(),
            ),
            Value::Map(entries) => {
                let ordering = self.options.map_ordering();
                let mut children = Vec::with_capacity(entries.len());
                for (key, item) in entries {
                    let mut child = self.new_child(key);
                    child.set_value(item);
                    put_child(&mut children, child, ordering);
                }
                NodeValue::Map(children)
            }
        };
        self
    }

    /// Graft `node` at `path`, keeping its comments.
    ///
    /// The grafted subtree is re-pathed and adopts this tree's options.
    pub fn set_node<I, K>(&mut self, path: I, mut node: ConfigurationNode) -> &mut ConfigurationNode
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        let target = self.node_mut(path);
        node.adopt(target.path.clone(), &Arc::clone(&target.options));
        node.attachment = target.attachment;
        *target = node;
        target
    }

    /// Graft a detached node back at the path it was read from.
    ///
    /// `node.path()` must lie at or below this node's path. This is how a
    /// virtual node obtained from [`get`](Self::get) and then written to is
    /// materialized in the tree.
    pub fn attach(&mut self, node: ConfigurationNode) -> Result<&mut ConfigurationNode> {
        let Some(relative) = node.path.strip_prefix(self.path.as_slice()) else {
            return Err(ConfigError::UserError(format!(
                "cannot attach node at '{}' under '{}'",
                display_path(&node.path),
                display_path(&self.path)
            )));
        };
        let relative = relative.to_vec();
        Ok(self.set_node(relative, node))
    }

    /// Append a new null element to this list and return it.
    ///
    /// A null node is promoted to an empty list first.
    pub fn append_list_node(&mut self) -> Result<&mut ConfigurationNode> {
        match &self.value {
            NodeValue::List(_) | NodeValue::Scalar(Scalar::Null) => {}
            _ => {
                return Err(ConfigError::WrongNodeType {
                    path: display_path(&self.path),
                    expected: "list or null".to_string(),
                    found: self.node_type(),
                });
            }
        }

        let parent = self.path.clone();
        let options = Arc::clone(&self.options);
        let items = self.children_as(NodeType::List);
        let index = items.len();
        items.push(make_child(&parent, NodeKey::index(index), &options));
        Ok(&mut items[index])
    }

    /// Detach and return the node at `path`.
    ///
    /// Removing a list element shifts the following elements down. The
    /// returned node is re-rooted.
    pub fn remove<I, K>(&mut self, path: I) -> Option<ConfigurationNode>
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        let mut path = key::to_path(path);
        let key = path.pop()?;
        let parent = self.get_mut(path)?;
        let mut removed = parent.remove_child(&key)?;
        let options = Arc::clone(&removed.options);
        removed.adopt(Vec::new(), &options);
        Some(removed)
    }

    fn remove_child(&mut self, key: &NodeKey) -> Option<ConfigurationNode> {
        let parent = self.path.clone();
        let options = Arc::clone(&self.options);
        match &mut self.value {
            NodeValue::List(items) => {
                let index = key.as_index().filter(|&index| index < items.len())?;
                let removed = items.remove(index);
                for (offset, item) in items.iter_mut().enumerate().skip(index) {
                    item.adopt(child_path(&parent, NodeKey::index(offset)), &options);
                }
                Some(removed)
            }
            NodeValue::Map(children) => {
                let position = children.iter().position(|c| c.key() == Some(key))?;
                Some(children.remove(position))
            }
            NodeValue::Scalar(_) => None,
        }
    }

    /// Deep-merge `other` into this node.
    ///
    /// Maps merge per key, lists append copies of `other`'s elements, and any
    /// other non-null value in `other` replaces this node's value. A null in
    /// `other` never overwrites. `other`'s comment fills a missing comment.
    pub fn merge_from(&mut self, other: &ConfigurationNode) -> &mut Self {
        if self.comment.is_none() {
            self.comment = other.comment.clone();
        }

        match &other.value {
            NodeValue::Scalar(Scalar::Null) => {}
            NodeValue::Map(other_children) if self.is_map() => {
                for other_child in other_children {
                    if let Some(key) = other_child.key() {
                        self.child_or_insert(key.clone()).merge_from(other_child);
                    }
                }
            }
            NodeValue::List(other_items) if self.is_list() => {
                let parent = self.path.clone();
                let options = Arc::clone(&self.options);
                let items = self.children_as(NodeType::List);
                for other_item in other_items {
                    let mut item = other_item.clone();
                    item.adopt(child_path(&parent, NodeKey::index(items.len())), &options);
                    items.push(item);
                }
            }
            _ => {
                let mut replacement = other.clone();
                replacement.adopt(self.path.clone(), &Arc::clone(&self.options));
                replacement.comment = self.comment.take();
                replacement.attachment = self.attachment;
                *self = replacement;
            }
        }

        self
    }

    /// Deep copy of this node as a new root.
    pub fn copy(&self) -> ConfigurationNode {
        let mut copy = self.clone();
        copy.adopt(Vec::new(), &Arc::clone(&self.options));
        copy.attachment = self.attachment;
        copy
    }

    /// Detached native value of this node, without comments.
    pub fn to_value(&self) -> Value {
        match &self.value {
            NodeValue::Scalar(scalar) => Value::from(scalar.clone()),
            NodeValue::List(items) => Value::List(items.iter().map(Self::to_value).collect()),
            NodeValue::Map(children) => Value::Map(
                children
                    .iter()
                    .filter_map(|child| child.key().map(|key| (key.clone(), child.to_value())))
                    .collect(),
            ),
        }
    }

    /// Run `action` against this node and return it for chaining.
    pub fn act<F: FnOnce(&mut Self)>(&mut self, action: F) -> &mut Self {
        action(self);
        self
    }

    /// Whether this node is left out of encoded output.
    ///
    /// Only applies when `collapse_empty` is enabled: lists and maps whose
    /// children all collapse (including having none) are treated as absent.
    pub(crate) fn collapses(&self) -> bool {
        if !self.options.collapse_empty() {
            return false;
        }
        match &self.value {
            NodeValue::Scalar(_) => false,
            NodeValue::List(children) | NodeValue::Map(children) => {
                children.iter().all(ConfigurationNode::collapses)
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn new_child(&self, key: NodeKey) -> ConfigurationNode {
        make_child(&self.path, key, &self.options)
    }

    /// Child at `key`, inserting a null child if absent.
    fn child_or_insert(&mut self, key: NodeKey) -> &mut ConfigurationNode {
        let parent = self.path.clone();
        let options = Arc::clone(&self.options);

        let list_index = match &self.value {
            NodeValue::List(_) => key.as_index(),
            _ => None,
        };
        if let Some(index) = list_index {
            let items = self.children_as(NodeType::List);
            while items.len() <= index {
                items.push(make_child(&parent, NodeKey::index(items.len()), &options));
            }
            return &mut items[index];
        }

        let children = self.children_as(NodeType::Map);
        let position = match children.iter().position(|c| c.key() == Some(&key)) {
            Some(position) => position,
            None => insert_child(
                children,
                make_child(&parent, key, &options),
                options.map_ordering(),
            ),
        };
        &mut children[position]
    }

    /// Children of this node after converting it to a list or map.
    ///
    /// A list converted to a map keeps its elements keyed by index. Any
    /// other conversion discards the previous value.
    fn children_as(&mut self, kind: NodeType) -> &mut Vec<ConfigurationNode> {
        self.value = match (std::mem::take(&mut self.value), kind) {
            (NodeValue::List(items), NodeType::List) => NodeValue::List(items),
            (NodeValue::List(items), _) => NodeValue::Map(items),
            (NodeValue::Map(children), NodeType::Map) => NodeValue::Map(children),
            (_, NodeType::List) => NodeValue::List(Vec::new()),
            _ => NodeValue::Map(Vec::new()),
        };
        match &mut self.value {
            NodeValue::List(children) | NodeValue::Map(children) => children,
            NodeValue::Scalar(_) => unreachable!("value was converted to a collection"),
        }
    }

    /// Re-path this subtree under `path` and share `options`.
    fn adopt(&mut self, path: Vec<NodeKey>, options: &Arc<NodeOptions>) {
        self.options = Arc::clone(options);
        self.attachment = Attachment::Attached;
        match &mut self.value {
            NodeValue::List(items) => {
                for (index, item) in items.iter_mut().enumerate() {
                    item.adopt(child_path(&path, NodeKey::index(index)), options);
                }
            }
            NodeValue::Map(children) => {
                for child in children.iter_mut() {
                    if let Some(key) = child.path.last().cloned() {
                        child.adopt(child_path(&path, key), options);
                    }
                }
                if options.map_ordering() == MapOrdering::Sorted {
                    children.sort_by(|a, b| a.key().cmp(&b.key()));
                }
            }
            NodeValue::Scalar(_) => {}
        }
        self.path = path;
    }
}

impl Default for ConfigurationNode {
    fn default() -> Self {
        Self::root()
    }
}

impl PartialEq for ConfigurationNode {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (NodeValue::Scalar(a), NodeValue::Scalar(b)) => a == b,
            (NodeValue::List(a), NodeValue::List(b)) => a == b,
            (NodeValue::Map(a), NodeValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|child| {
                        child
                            .key()
                            .and_then(|key| other.child(key))
                            .is_some_and(|theirs| theirs == child)
                    })
            }
            _ => false,
        }
    }
}

fn child_path(parent: &[NodeKey], key: NodeKey) -> Vec<NodeKey> {
    let mut path = Vec::with_capacity(parent.len() + 1);
    path.extend_from_slice(parent);
    path.push(key);
    path
}

fn make_child(parent: &[NodeKey], key: NodeKey, options: &Arc<NodeOptions>) -> ConfigurationNode {
    ConfigurationNode::build(
        child_path(parent, key),
        NodeValue::default(),
        Arc::clone(options),
        Attachment::Attached,
    )
}

/// Insert a new map child respecting `ordering`; returns its position.
fn insert_child(
    children: &mut Vec<ConfigurationNode>,
    child: ConfigurationNode,
    ordering: MapOrdering,
) -> usize {
    match ordering {
        MapOrdering::Insertion => {
            children.push(child);
            children.len() - 1
        }
        MapOrdering::Sorted => {
            let position = children.partition_point(|c| c.key() < child.key());
            children.insert(position, child);
            position
        }
    }
}

/// Insert or replace a map child by key; a replaced child keeps its position.
fn put_child(children: &mut Vec<ConfigurationNode>, child: ConfigurationNode, ordering: MapOrdering) {
    match children.iter().position(|c| c.key() == child.key()) {
        Some(position) => children[position] = child,
        None => {
            insert_child(children, child, ordering);
        }
    }
}
