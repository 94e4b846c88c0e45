//! Typed accessors with best-effort coercion.
//!
//! Accessors never fail: a value that cannot be coerced yields the caller's
//! default. Null and virtual nodes always yield the default.

use super::{ConfigurationNode, Scalar, Value};

/// Types that can be read out of a node with coercion.
pub trait FromNode: Sized {
    /// Coerce the node's value, or `None` when it cannot be represented.
    fn from_node(node: &ConfigurationNode) -> Option<Self>;
}

impl FromNode for String {
    fn from_node(node: &ConfigurationNode) -> Option<Self> {
        match node.scalar()? {
            Scalar::String(s) => Some(s.clone()),
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Int(i) => Some(i.to_string()),
            Scalar::Float(f) => Some(f.to_string()),
            Scalar::Null => None,
        }
    }
}

impl FromNode for i64 {
    fn from_node(node: &ConfigurationNode) -> Option<Self> {
        match node.scalar()? {
            Scalar::Int(i) => Some(*i),
            Scalar::Float(f) => integral(*f),
            Scalar::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            Scalar::Bool(_) | Scalar::Null => None,
        }
    }
}

/// `f` as an integer if it has no fractional part and fits in an `i64`.
fn integral(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    if f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

macro_rules! narrow_int_from_node {
    ($($t:ty),*) => {
        $(
            impl FromNode for $t {
                fn from_node(node: &ConfigurationNode) -> Option<Self> {
                    i64::from_node(node).and_then(|i| <$t>::try_from(i).ok())
                }
            }
        )*
    };
}

narrow_int_from_node!(i32, u16, u32, u64, usize);

impl FromNode for f64 {
    fn from_node(node: &ConfigurationNode) -> Option<Self> {
        match node.scalar()? {
            Scalar::Float(f) => Some(*f),
            Scalar::Int(i) => Some(*i as f64),
            Scalar::String(s) => s.trim().parse::<f64>().ok(),
            Scalar::Bool(_) | Scalar::Null => None,
        }
    }
}

impl FromNode for f32 {
    fn from_node(node: &ConfigurationNode) -> Option<Self> {
        f64::from_node(node).map(|f| f as f32)
    }
}

impl FromNode for bool {
    fn from_node(node: &ConfigurationNode) -> Option<Self> {
        match node.scalar()? {
            Scalar::Bool(b) => Some(*b),
            Scalar::Int(0) => Some(false),
            Scalar::Int(1) => Some(true),
            Scalar::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Lists coerce element-wise; a single non-null scalar becomes a one-element list.
impl<T: FromNode> FromNode for Vec<T> {
    fn from_node(node: &ConfigurationNode) -> Option<Self> {
        if node.is_list() {
            return node.children_list().iter().map(T::from_node).collect();
        }
        match node.scalar()? {
            Scalar::Null => None,
            _ => T::from_node(node).map(|item| vec![item]),
        }
    }
}

impl FromNode for Value {
    fn from_node(node: &ConfigurationNode) -> Option<Self> {
        Some(node.to_value())
    }
}

impl ConfigurationNode {
    /// Coerce this node's value to `T`, falling back to `default`.
    pub fn get_as<T: FromNode>(&self, default: T) -> T {
        T::from_node(self).unwrap_or(default)
    }

    /// Coerce this node's value to `T`, if possible.
    pub fn try_get_as<T: FromNode>(&self) -> Option<T> {
        T::from_node(self)
    }

    pub fn get_string(&self, default: &str) -> String {
        String::from_node(self).unwrap_or_else(|| default.to_string())
    }

    pub fn get_int(&self, default: i64) -> i64 {
        self.get_as(default)
    }

    pub fn get_float(&self, default: f64) -> f64 {
        self.get_as(default)
    }

    pub fn get_bool(&self, default: bool) -> bool {
        self.get_as(default)
    }

    pub fn get_list<T: FromNode>(&self, default: Vec<T>) -> Vec<T> {
        self.get_as(default)
    }
}
