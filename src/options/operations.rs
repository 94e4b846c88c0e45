//! Options loading and validation.

use super::model::{MAX_INDENT, NodeOptions};
use crate::error::{ConfigError, Result};
use std::path::Path;

impl NodeOptions {
    /// Load options from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::io(
                format!("failed to read options file '{}'", path.display()),
                e,
            )
        })?;

        Self::from_yaml(&content)
    }

    /// Parse options from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let options: NodeOptions = serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::UserError(format!("failed to parse options YAML: {}", e))
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Validate option values.
    ///
    /// - `indent` must be between 1 and 8
    pub fn validate(&self) -> Result<()> {
        if self.indent() == 0 || self.indent() > MAX_INDENT {
            return Err(ConfigError::UserError(format!(
                "options validation failed: indent must be between 1 and {} (found {})",
                MAX_INDENT,
                self.indent()
            )));
        }

        Ok(())
    }
}
