//! Format codecs and the format-name registry.
//!
//! A [`Codec`] translates between a node graph and one textual format. The
//! tree itself knows nothing about formats; codecs only see the node API.
//!
//! Decoding is all-or-nothing: a failed decode returns an error and no node.
//! Encoding checks the node against the format's [`FormatCapabilities`]
//! first when strict native types are enabled.

pub mod capabilities;
mod json;
mod registry;
mod yaml;


pub use capabilities::{FormatCapabilities, ScalarKind};
pub use json::JsonCodec;
pub use registry::{FormatRegistry, resolve_codec};
pub use yaml::YamlCodec;

use crate::error::{ConfigError, Result};
use crate::node::ConfigurationNode;
use crate::options::NodeOptions;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

/// Decode/encode contract shared by every format.
pub trait Codec: fmt::Debug + Send + Sync {
    /// Canonical lowercase format name.
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// File extensions (without dots) this format is recognized by.
    fn extensions(&self) -> &'static [&'static str];

    fn capabilities(&self) -> &'static FormatCapabilities;

    /// Parse a whole document into a new root node sharing `options`.
    fn decode(&self, reader: &mut dyn Read, options: Arc<NodeOptions>) -> Result<ConfigurationNode>;

    /// Write `node` as a complete document.
    fn encode(&self, node: &ConfigurationNode, writer: &mut dyn Write) -> Result<()>;

    fn decode_str(&self, text: &str, options: Arc<NodeOptions>) -> Result<ConfigurationNode> {
        self.decode(&mut text.as_bytes(), options)
    }

    fn encode_to_string(&self, node: &ConfigurationNode) -> Result<String> {
        let mut buffer = Vec::new();
        self.encode(node, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            ConfigError::io(
                format!("{} output is not valid UTF-8", self.name()),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }
}

/// Read a whole document as UTF-8 text.
fn read_text(reader: &mut dyn Read, format: &str) -> Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| ConfigError::io(format!("failed to read {} input", format), e))?;
    Ok(text)
}

/// Build a parse error, dropping the position suffix serde error messages
/// carry since line and column are reported separately.
fn parse_error(message: String, line: usize, column: usize) -> ConfigError {
    let message = match message.rfind(" at line ") {
        Some(position) => message[..position].to_string(),
        None => message,
    };
    ConfigError::Parse {
        line,
        column,
        message,
    }
}
