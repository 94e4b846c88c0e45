//! cfgtree: a format-agnostic configuration node tree.
//!
//! Documents decode into a tree of [`node::ConfigurationNode`]s that can be
//! read and edited by path without knowing the source format, then encoded
//! with any registered [`format::Codec`].
//!
//! ```
//! use cfgtree::format::{Codec, resolve_codec};
//! use cfgtree::options::NodeOptions;
//! use std::sync::Arc;
//!
//! let yaml = resolve_codec("yaml")?;
//! let mut root = yaml.decode_str("server:\n  port: 8080\n", Arc::new(NodeOptions::default()))?;
//! root.set(["server", "host"], "localhost");
//!
//! let json = resolve_codec("json")?.encode_to_string(&root)?;
//! assert!(json.contains("\"host\": \"localhost\""));
//! # Ok::<(), cfgtree::error::ConfigError>(())
//! ```

pub mod error;
pub mod exit_codes;
pub mod format;
pub mod fs;
pub mod loader;
pub mod node;
pub mod options;
