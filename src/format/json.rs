//! JSON codec.

use super::capabilities::{self, FormatCapabilities};
use super::{Codec, parse_error, read_text};
use crate::error::{ConfigError, Result};
use crate::node::{ConfigurationNode, NodeSeed};
use crate::options::NodeOptions;
use serde::Serialize;
use serde::de::DeserializeSeed;
use serde_json::ser::PrettyFormatter;
use std::io::{Read, Write};
use std::sync::Arc;

/// Strict RFC 8259 JSON.
///
/// Comments are not part of the format and are dropped on encode. Map keys
/// that are not strings are written as strings and non-finite floats as
/// `null` unless strict native types are enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["gson"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn capabilities(&self) -> &'static FormatCapabilities {
        &capabilities::JSON
    }

    fn decode(&self, reader: &mut dyn Read, options: Arc<NodeOptions>) -> Result<ConfigurationNode> {
        let text = read_text(reader, self.name())?;
        if text.trim().is_empty() {
            return Ok(ConfigurationNode::root_with(options));
        }

        let mut deserializer = serde_json::Deserializer::from_str(&text);
        let node = NodeSeed::root(options)
            .deserialize(&mut deserializer)
            .and_then(|node| deserializer.end().map(|()| node))
            .map_err(|e| parse_error(e.to_string(), e.line(), e.column()))?;

        tracing::trace!(bytes = text.len(), "decoded json document");
        Ok(node)
    }

    fn encode(&self, node: &ConfigurationNode, writer: &mut dyn Write) -> Result<()> {
        self.capabilities().check_native(node)?;

        let indent = " ".repeat(node.options().indent());
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        node.serialize(&mut serializer)
            .map_err(|e| ConfigError::io("failed to write json output", e.into()))?;
        writer
            .write_all(b"\n")
            .map_err(|e| ConfigError::io("failed to write json output", e))
    }
}
