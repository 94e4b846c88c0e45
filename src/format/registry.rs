//! Format name to codec lookup.

use super::{Codec, JsonCodec, YamlCodec};
use crate::error::{ConfigError, Result};
use std::path::Path;
use std::sync::{Arc, LazyLock};

static DEFAULT_REGISTRY: LazyLock<FormatRegistry> = LazyLock::new(FormatRegistry::default);

/// Codecs addressable by name, alias or file extension.
///
/// Lookups are case-insensitive. The default registry holds the JSON and
/// YAML codecs.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    codecs: Vec<Arc<dyn Codec>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// The shared registry with every built-in codec.
    pub fn global() -> &'static FormatRegistry {
        &DEFAULT_REGISTRY
    }

    /// Add a codec, replacing any codec registered under the same name.
    pub fn register(&mut self, codec: Arc<dyn Codec>) -> &mut Self {
        self.codecs.retain(|existing| existing.name() != codec.name());
        self.codecs.push(codec);
        self
    }

    pub fn codecs(&self) -> &[Arc<dyn Codec>] {
        &self.codecs
    }

    /// Canonical names of the registered codecs, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.codecs.iter().map(|codec| codec.name()).collect()
    }

    /// Look a codec up by name or alias.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Codec>> {
        let wanted = name.trim().to_ascii_lowercase();
        self.codecs
            .iter()
            .find(|codec| codec.name() == wanted || codec.aliases().contains(&wanted.as_str()))
            .cloned()
            .ok_or_else(|| self.not_found(name))
    }

    /// Pick a codec from a file's extension.
    pub fn for_path(&self, path: &Path) -> Result<Arc<dyn Codec>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                ConfigError::UserError(format!(
                    "cannot infer the format of '{}' without a file extension; name the format explicitly",
                    path.display()
                ))
            })?;

        self.codecs
            .iter()
            .find(|codec| codec.extensions().contains(&extension.as_str()))
            .cloned()
            .ok_or_else(|| self.not_found(&extension))
    }

    fn not_found(&self, name: &str) -> ConfigError {
        ConfigError::NotFound {
            name: name.to_string(),
            known: self.names().join(", "),
        }
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry
            .register(Arc::new(JsonCodec))
            .register(Arc::new(YamlCodec));
        registry
    }
}

/// Resolve a format name against the global registry.
pub fn resolve_codec(name: &str) -> Result<Arc<dyn Codec>> {
    FormatRegistry::global().resolve(name)
}
