//! Command implementations for cfgtree.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod convert;
mod formats;
mod tree;

use crate::cli::Command;
use cfgtree::error::{ConfigError, Result};
use cfgtree::format::{Codec, FormatRegistry, resolve_codec};
use cfgtree::loader::Location;
use std::sync::Arc;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => convert::cmd_convert(args),
        Command::Tree(args) => tree::cmd_tree(args),
        Command::Formats => formats::cmd_formats(),
    }
}

/// Codec named by `explicit`, or inferred from the location's extension.
fn codec_for(location: &Location, explicit: Option<&str>, flag: &str) -> Result<Arc<dyn Codec>> {
    if let Some(name) = explicit {
        return resolve_codec(name);
    }
    match location {
        Location::File(path) => FormatRegistry::global().for_path(path),
        Location::Stdio => Err(ConfigError::UserError(format!(
            "a format is required for standard input/output; pass {} <FORMAT>",
            flag
        ))),
    }
}

/// Input files must exist; the library treats a missing file as an empty tree.
fn require_input(location: &Location) -> Result<()> {
    if let Some(path) = location.path()
        && !path.exists()
    {
        return Err(ConfigError::UserError(format!(
            "input file '{}' does not exist",
            path.display()
        )));
    }
    Ok(())
}
