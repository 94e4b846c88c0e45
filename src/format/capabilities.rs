//! What each format can represent natively.
//!
//! | format | scalars                        | non-finite | comments | string keys only |
//! |--------|--------------------------------|------------|----------|------------------|
//! | json   | null, bool, int, float, string | no         | no       | yes              |
//! | yaml   | null, bool, int, float, string | yes        | yes      | no               |
//! | hocon  | null, bool, int, float, string | no         | yes      | yes              |
//! | xml    | bool, int, float, string       | no         | yes      | yes              |
//!
//! HOCON and XML are described here so conversions can be planned against
//! them, but no codec for them is registered.

use crate::error::{ConfigError, Result};
use crate::node::{ConfigurationNode, NodeType, NodeVisitor, Scalar, display_path};
use std::fmt;

/// Kind of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
}

impl ScalarKind {
    pub fn of(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Null => ScalarKind::Null,
            Scalar::Bool(_) => ScalarKind::Boolean,
            Scalar::Int(_) => ScalarKind::Integer,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::String(_) => ScalarKind::String,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Null => "null",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
        };
        f.write_str(name)
    }
}

/// Capability descriptor of a format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCapabilities {
    pub name: &'static str,
    pub scalars: &'static [ScalarKind],
    /// NaN and infinities have a native spelling.
    pub non_finite_floats: bool,
    pub comments: bool,
    pub string_keys_only: bool,
}

const ALL_SCALARS: &[ScalarKind] = &[
    ScalarKind::Null,
    ScalarKind::Boolean,
    ScalarKind::Integer,
    ScalarKind::Float,
    ScalarKind::String,
];

pub const JSON: FormatCapabilities = FormatCapabilities {
    name: "json",
    scalars: ALL_SCALARS,
    non_finite_floats: false,
    comments: false,
    string_keys_only: true,
};

pub const YAML: FormatCapabilities = FormatCapabilities {
    name: "yaml",
    scalars: ALL_SCALARS,
    non_finite_floats: true,
    comments: true,
    string_keys_only: false,
};

pub const HOCON: FormatCapabilities = FormatCapabilities {
    name: "hocon",
    scalars: ALL_SCALARS,
    non_finite_floats: false,
    comments: true,
    string_keys_only: true,
};

pub const XML: FormatCapabilities = FormatCapabilities {
    name: "xml",
    scalars: &[
        ScalarKind::Boolean,
        ScalarKind::Integer,
        ScalarKind::Float,
        ScalarKind::String,
    ],
    non_finite_floats: false,
    comments: true,
    string_keys_only: true,
};

/// Every known descriptor, including formats without a codec.
pub const KNOWN_FORMATS: [&FormatCapabilities; 4] = [&JSON, &YAML, &HOCON, &XML];

impl FormatCapabilities {
    pub fn supports(&self, kind: ScalarKind) -> bool {
        self.scalars.contains(&kind)
    }

    /// Verify every value in `node` is native to this format.
    ///
    /// Only enforced when the node's options enable strict native types;
    /// otherwise codecs coerce on encode.
    pub fn check_native(&self, node: &ConfigurationNode) -> Result<()> {
        if !node.options().strict_native_types() {
            return Ok(());
        }
        node.visit(NativeTypeCheck {
            capabilities: self,
            containers: Vec::new(),
        })
    }

    fn unsupported(&self, node: &ConfigurationNode, reason: String) -> ConfigError {
        ConfigError::UnsupportedValue {
            format: self.name.to_string(),
            path: display_path(node.path()),
            reason,
        }
    }
}

/// Strict-mode walk; tracks the enclosing container so list indices are
/// not mistaken for map keys.
struct NativeTypeCheck<'a> {
    capabilities: &'a FormatCapabilities,
    containers: Vec<NodeType>,
}

impl NodeVisitor for NativeTypeCheck<'_> {
    type Output = ();
    type Error = ConfigError;

    fn enter_node(&mut self, node: &ConfigurationNode) -> Result<()> {
        if node.collapses() {
            return Ok(());
        }
        if let (Some(NodeType::Map), Some(key)) = (self.containers.last(), node.key())
            && self.capabilities.string_keys_only
            && !key.is_name()
        {
            return Err(self
                .capabilities
                .unsupported(node, format!("map key {} is not a string", key)));
        }
        Ok(())
    }

    fn enter_map(&mut self, _node: &ConfigurationNode) -> Result<()> {
        self.containers.push(NodeType::Map);
        Ok(())
    }

    fn exit_map(&mut self, _node: &ConfigurationNode) -> Result<()> {
        self.containers.pop();
        Ok(())
    }

    fn enter_list(&mut self, _node: &ConfigurationNode) -> Result<()> {
        self.containers.push(NodeType::List);
        Ok(())
    }

    fn exit_list(&mut self, _node: &ConfigurationNode) -> Result<()> {
        self.containers.pop();
        Ok(())
    }

    fn visit_scalar(&mut self, node: &ConfigurationNode, scalar: &Scalar) -> Result<()> {
        let kind = ScalarKind::of(scalar);
        if !self.capabilities.supports(kind) {
            return Err(self
                .capabilities
                .unsupported(node, format!("{} values are not supported", kind)));
        }
        if let Scalar::Float(f) = scalar
            && !f.is_finite()
            && !self.capabilities.non_finite_floats
        {
            return Err(self
                .capabilities
                .unsupported(node, format!("non-finite float {}", f)));
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKey, Value};
    use crate::options::NodeOptions;
    use std::sync::Arc;

    fn strict_root() -> ConfigurationNode {
        ConfigurationNode::root_with(Arc::new(
            NodeOptions::default().with_strict_native_types(true),
        ))
    }

    #[test]
    fn int_map_key_rejected_for_string_key_formats() {
        let mut root = strict_root();
        root.set(["ports", "http"], 80);
        root.set([NodeKey::from("ports"), NodeKey::Int(8443)], "alt");

        let err = JSON.check_native(&root).unwrap_err();
        match err {
            ConfigError::UnsupportedValue { format, path, .. } => {
                assert_eq!(format, "json");
                assert_eq!(path, "ports.8443");
            }
            other => panic!("expected UnsupportedValue, got {:?}", other),
        }
        assert!(YAML.check_native(&root).is_ok());
    }

    #[test]
    fn list_indices_are_not_map_keys() {
        let mut root = strict_root();
        root.set(["items"], vec!["a", "b"]);
        assert!(JSON.check_native(&root).is_ok());
    }

    #[test]
    fn non_finite_floats_rejected_where_unsupported() {
        let mut root = strict_root();
        root.set(["ratio"], f64::INFINITY);

        assert!(JSON.check_native(&root).is_err());
        assert!(YAML.check_native(&root).is_ok());
    }

    #[test]
    fn xml_has_no_null() {
        let mut root = strict_root();
        root.set(["nothing"], Value::Null);

        let err = XML.check_native(&root).unwrap_err();
        assert!(err.to_string().contains("null values are not supported"));
        assert!(HOCON.check_native(&root).is_ok());
    }

    #[test]
    fn lenient_options_skip_the_check() {
        let mut root = ConfigurationNode::root();
        root.set([7], f64::NAN);
        assert!(JSON.check_native(&root).is_ok());
    }

    #[test]
    fn descriptors_are_listed() {
        let names: Vec<&str> = KNOWN_FORMATS.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["json", "yaml", "hocon", "xml"]);
        assert!(!JSON.comments);
        assert!(YAML.comments);
    }
}
