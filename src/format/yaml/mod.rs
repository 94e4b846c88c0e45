//! YAML codec.
//!
//! Decoding goes through serde_yaml; comments are not visible to serde, so a
//! separate line scan recovers them afterwards (see [`comments`]). Encoding
//! uses a block-style emitter that writes comments as `#` lines above the
//! entry they belong to.

mod comments;
mod emit;

use super::capabilities::{self, FormatCapabilities};
use super::{Codec, parse_error, read_text};
use crate::error::{ConfigError, Result};
use crate::node::{ConfigurationNode, NodeSeed};
use crate::options::NodeOptions;
use serde::de::DeserializeSeed;
use std::io::{Read, Write};
use std::sync::Arc;

/// YAML 1.2 block documents.
///
/// Map keys may be integers. A single document per input.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["yml"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn capabilities(&self) -> &'static FormatCapabilities {
        &capabilities::YAML
    }

    fn decode(&self, reader: &mut dyn Read, options: Arc<NodeOptions>) -> Result<ConfigurationNode> {
        let text = read_text(reader, self.name())?;

        let mut root = if has_content(&text) {
            NodeSeed::root(options)
                .deserialize(serde_yaml::Deserializer::from_str(&text))
                .map_err(yaml_error)?
        } else {
            ConfigurationNode::root_with(options)
        };

        let attached = comments::attach(&mut root, &text);
        tracing::trace!(bytes = text.len(), comments = attached, "decoded yaml document");
        Ok(root)
    }

    fn encode(&self, node: &ConfigurationNode, writer: &mut dyn Write) -> Result<()> {
        self.capabilities().check_native(node)?;

        let document = emit::document(node, node.options().indent());
        writer
            .write_all(document.as_bytes())
            .map_err(|e| ConfigError::io("failed to write yaml output", e))
    }
}

/// Anything besides blank lines, comments and document markers.
fn has_content(text: &str) -> bool {
    text.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with('#') && line != "---" && line != "..."
    })
}

fn yaml_error(err: serde_yaml::Error) -> ConfigError {
    let (line, column) = err
        .location()
        .map_or((0, 0), |location| (location.line(), location.column()));
    parse_error(err.to_string(), line, column)
}
