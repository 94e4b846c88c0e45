//! NodeOptions definition and default implementation.

use serde::{Deserialize, Serialize};

/// How map children are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MapOrdering {
    /// Keys keep the order they were first inserted in (default).
    #[default]
    Insertion,
    /// Keys are kept sorted; integer keys sort before names.
    Sorted,
}

/// Serialization behavior for a node graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeOptions {
    /// Ordering of map children.
    map_ordering: MapOrdering,

    /// Treat empty lists and maps as absent when encoding.
    collapse_empty: bool,

    /// Reject values the target format cannot represent natively instead of
    /// coercing them.
    strict_native_types: bool,

    /// Indentation width used by codecs that pretty-print.
    #[serde(default = "default_indent")]
    indent: usize,
}

/// Largest indentation width codecs accept.
pub const MAX_INDENT: usize = 8;

pub(super) fn default_indent() -> usize {
    2
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            map_ordering: MapOrdering::default(),
            collapse_empty: false,
            strict_native_types: false,
            indent: default_indent(),
        }
    }
}

impl NodeOptions {
    pub fn map_ordering(&self) -> MapOrdering {
        self.map_ordering
    }

    pub fn collapse_empty(&self) -> bool {
        self.collapse_empty
    }

    pub fn strict_native_types(&self) -> bool {
        self.strict_native_types
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn with_map_ordering(mut self, ordering: MapOrdering) -> Self {
        self.map_ordering = ordering;
        self
    }

    pub fn with_collapse_empty(mut self, collapse: bool) -> Self {
        self.collapse_empty = collapse;
        self
    }

    pub fn with_strict_native_types(mut self, strict: bool) -> Self {
        self.strict_native_types = strict;
        self
    }

    /// Set the indentation width, clamped to `1..=MAX_INDENT`.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.clamp(1, MAX_INDENT);
        self
    }
}
