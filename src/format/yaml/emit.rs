//! Block-style YAML emitter.

use crate::node::{ConfigurationNode, NodeKey, NodeType, Scalar};
use std::fmt::Write;

/// Render `root` as a complete YAML document.
pub(super) fn document(root: &ConfigurationNode, indent: usize) -> String {
    let mut out = String::new();
    if let Some(comment) = root.comment() {
        write_comment(&mut out, comment, 0);
        out.push('\n');
    }

    match inline_form(root) {
        Some(text) => {
            out.push_str(&text);
            out.push('\n');
        }
        // Nested maps need at least one column to stay nested.
        None => block(&mut out, root, 0, indent.max(1)),
    }
    out
}

/// Single-line rendering for scalars and empty collections; `None` when the
/// node needs a nested block.
fn inline_form(node: &ConfigurationNode) -> Option<String> {
    match node.node_type() {
        NodeType::Map if kept(node).is_empty() => Some("{}".to_string()),
        NodeType::List if kept(node).is_empty() => Some("[]".to_string()),
        NodeType::Map | NodeType::List => None,
        _ => Some(node.scalar().map_or_else(|| "null".to_string(), scalar_text)),
    }
}

/// Children that survive `collapse_empty`, with their keys.
fn kept(node: &ConfigurationNode) -> Vec<(&NodeKey, &ConfigurationNode)> {
    if node.is_list() {
        node.children_list()
            .iter()
            .filter(|item| !item.collapses())
            .filter_map(|item| item.key().map(|key| (key, item)))
            .collect()
    } else {
        node.children_map()
            .filter(|(_, child)| !child.collapses())
            .collect()
    }
}

/// Write the children of a non-empty map or list, each line starting at `column`.
fn block(out: &mut String, node: &ConfigurationNode, column: usize, indent: usize) {
    let is_list = node.is_list();
    for (key, child) in kept(node) {
        if let Some(comment) = child.comment() {
            write_comment(out, comment, column);
        }
        let pad = " ".repeat(column);

        if is_list {
            match inline_form(child) {
                Some(text) => {
                    let _ = writeln!(out, "{}- {}", pad, text);
                }
                None => {
                    // Nested block starts on the dash line.
                    let mut nested = String::new();
                    block(&mut nested, child, column + 2, indent);
                    out.push_str(&pad);
                    out.push_str("- ");
                    out.push_str(&nested[column + 2..]);
                }
            }
        } else {
            let key = key_text(key);
            match inline_form(child) {
                Some(text) => {
                    let _ = writeln!(out, "{}{}: {}", pad, key, text);
                }
                None => {
                    let _ = writeln!(out, "{}{}:", pad, key);
                    block(out, child, column + indent, indent);
                }
            }
        }
    }
}

fn write_comment(out: &mut String, comment: &str, column: usize) {
    let pad = " ".repeat(column);
    for line in comment.lines() {
        if line.is_empty() {
            let _ = writeln!(out, "{}#", pad);
        } else {
            let _ = writeln!(out, "{}# {}", pad, line);
        }
    }
}

fn key_text(key: &NodeKey) -> String {
    match key {
        NodeKey::Int(i) => i.to_string(),
        NodeKey::Name(name) => scalar_text(&Scalar::String(name.clone())),
    }
}

/// Plain or quoted single-line scalar, as serde_yaml would write it.
///
/// Multi-line strings are written double-quoted with escapes instead of as
/// block literals so every scalar fits on its key's line.
fn scalar_text(scalar: &Scalar) -> String {
    if let Scalar::String(text) = scalar
        && text.contains('\n')
    {
        return serde_json::Value::String(text.clone()).to_string();
    }

    match serde_yaml::to_string(scalar) {
        Ok(rendered) if !rendered.trim_end().contains('\n') => rendered.trim_end().to_string(),
        _ => match scalar {
            Scalar::String(text) => serde_json::Value::String(text.clone()).to_string(),
            other => format!("{:?}", other),
        },
    }
}
