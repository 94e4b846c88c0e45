//! Implementation of the `cfgtree tree` command.
//!
//! Prints one line per node: key, type and (for scalars) value, indented by
//! depth. Comments are shown as `#` lines above their node.

use super::{codec_for, require_input};
use crate::cli::TreeArgs;
use cfgtree::error::Result;
use cfgtree::loader::{Loader, Location};
use cfgtree::node::{ConfigurationNode, NodeVisitor, Scalar, display_path};
use std::convert::Infallible;
use std::fmt::Write;

/// Execute the `cfgtree tree` command.
pub fn cmd_tree(args: TreeArgs) -> Result<()> {
    let input = Location::from_arg(&args.input);
    let codec = codec_for(&input, args.from.as_deref(), "--from")?;
    require_input(&input)?;

    let node = Loader::new(codec, input).load()?;
    print!("{}", render(&node));
    Ok(())
}

fn render(node: &ConfigurationNode) -> String {
    let Ok(text) = node.visit(TreePrinter {
        base_depth: node.path().len(),
        out: String::new(),
    });
    text
}

struct TreePrinter {
    base_depth: usize,
    out: String,
}

impl NodeVisitor for TreePrinter {
    type Output = String;
    type Error = Infallible;

    fn enter_node(&mut self, node: &ConfigurationNode) -> std::result::Result<(), Infallible> {
        let pad = "  ".repeat(node.path().len() - self.base_depth);
        if let Some(comment) = node.comment() {
            for line in comment.lines() {
                let _ = writeln!(self.out, "{}# {}", pad, line);
            }
        }

        let key = match node.key() {
            Some(key) if node.path().len() > self.base_depth => key.to_string(),
            _ => display_path(node.path()),
        };
        let _ = write!(self.out, "{}{}: {}", pad, key, node.node_type());
        match node.scalar() {
            Some(Scalar::Null) | None => {}
            Some(scalar) => {
                let _ = write!(self.out, " = {}", scalar_display(scalar));
            }
        }
        self.out.push('\n');
        Ok(())
    }

    fn finish(self) -> std::result::Result<String, Infallible> {
        Ok(self.out)
    }
}

fn scalar_display(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => format!("{:?}", f),
        Scalar::String(s) => format!("{:?}", s),
    }
}
