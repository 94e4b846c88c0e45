//! Serde integration for nodes.
//!
//! Nodes serialize through any serde `Serializer`, emitting map entries in
//! their recorded order and skipping collapsed empty collections. Decoding
//! goes through [`NodeSeed`], which builds nodes directly from a
//! `Deserializer` so map order is whatever the document used.
//!
//! The same machinery backs object mapping: `get_deserialized` and
//! `set_serialized` convert between a node and any serde type.

use super::{ConfigurationNode, NodeKey, NodeValue, Scalar, display_path, put_child};
use crate::error::{ConfigError, Result};
use crate::options::NodeOptions;
use serde::de::{self, DeserializeOwned, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for ConfigurationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.value {
            NodeValue::Scalar(scalar) => scalar.serialize(serializer),
            NodeValue::List(items) => {
                let kept: Vec<&ConfigurationNode> =
                    items.iter().filter(|item| !item.collapses()).collect();
                let mut seq = serializer.serialize_seq(Some(kept.len()))?;
                for item in kept {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            NodeValue::Map(children) => {
                let kept: Vec<(&NodeKey, &ConfigurationNode)> = children
                    .iter()
                    .filter(|child| !child.collapses())
                    .filter_map(|child| child.key().map(|key| (key, child)))
                    .collect();
                let mut map = serializer.serialize_map(Some(kept.len()))?;
                for (key, child) in kept {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
        }
    }
}

/// Builds a node from any serde `Deserializer`.
pub(crate) struct NodeSeed {
    path: Vec<NodeKey>,
    options: Arc<NodeOptions>,
}

impl NodeSeed {
    pub(crate) fn new(path: Vec<NodeKey>, options: Arc<NodeOptions>) -> Self {
        Self { path, options }
    }

    pub(crate) fn root(options: Arc<NodeOptions>) -> Self {
        Self::new(Vec::new(), options)
    }

    fn child(&self, key: NodeKey) -> NodeSeed {
        NodeSeed::new(super::child_path(&self.path, key), Arc::clone(&self.options))
    }

    fn finish(self, value: NodeValue) -> ConfigurationNode {
        ConfigurationNode::build(self.path, value, self.options, super::Attachment::Attached)
    }

    fn scalar(self, scalar: Scalar) -> ConfigurationNode {
        self.finish(NodeValue::Scalar(scalar))
    }
}

impl<'de> DeserializeSeed<'de> for NodeSeed {
    type Value = ConfigurationNode;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed {
    type Value = ConfigurationNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
        Ok(self.scalar(Scalar::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(self.scalar(Scalar::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        let scalar = match i64::try_from(v) {
            Ok(i) => Scalar::Int(i),
            Err(_) => Scalar::Float(v as f64),
        };
        Ok(self.scalar(scalar))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Ok(self.scalar(Scalar::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(self.scalar(Scalar::String(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
        Ok(self.scalar(Scalar::String(v)))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(self.scalar(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(self.scalar(Scalar::Null))
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self.child(NodeKey::index(items.len())))? {
            items.push(item);
        }
        Ok(self.finish(NodeValue::List(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let ordering = self.options.map_ordering();
        let mut children = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key_seed(KeySeed)? {
            let child = map.next_value_seed(self.child(key))?;
            put_child(&mut children, child, ordering);
        }
        Ok(self.finish(NodeValue::Map(children)))
    }
}

/// Map keys: integers stay integers, everything else becomes a name.
struct KeySeed;

impl<'de> DeserializeSeed<'de> for KeySeed {
    type Value = NodeKey;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for KeySeed {
    type Value = NodeKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar map key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
        Ok(NodeKey::Name(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(NodeKey::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or_else(|_| NodeKey::Name(v.to_string()), NodeKey::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Ok(NodeKey::Name(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(NodeKey::Name(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
        Ok(NodeKey::Name(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(NodeKey::Name("null".to_string()))
    }
}

impl ConfigurationNode {
    /// Deserialize this node into a typed value.
    pub fn get_deserialized<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_json::to_value(self).map_err(|e| self.mapping_error(e))?;
        serde_json::from_value(value).map_err(|e| self.mapping_error(e))
    }

    /// Replace this node's value with the serialized form of `value`.
    ///
    /// Struct fields keep their declaration order. The node's comment is kept.
    pub fn set_serialized<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        let json = serde_json::to_string(value).map_err(|e| self.mapping_error(e))?;
        let mut deserializer = serde_json::Deserializer::from_str(&json);
        let decoded = NodeSeed::new(self.path.clone(), Arc::clone(&self.options))
            .deserialize(&mut deserializer)
            .map_err(|e| self.mapping_error(e))?;

        let comment = self.comment.take();
        *self = decoded;
        self.comment = comment;
        Ok(self)
    }

    fn mapping_error(&self, err: serde_json::Error) -> ConfigError {
        ConfigError::Mapping {
            path: display_path(&self.path),
            message: err.to_string(),
        }
    }
}
