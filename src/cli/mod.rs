//! CLI argument parsing for cfgtree.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// cfgtree: convert and inspect configuration documents.
///
/// Documents are decoded into a format-agnostic node tree, so any supported
/// format can be converted into any other.
#[derive(Parser, Debug)]
#[command(name = "cfgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for cfgtree.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a document from one format to another.
    ///
    /// Formats are inferred from file extensions unless given explicitly.
    /// Use `-` for standard input or output.
    Convert(ConvertArgs),

    /// Print the node tree of a document.
    ///
    /// Shows each node's path, type, value and comment.
    Tree(TreeArgs),

    /// List the registered formats and what they can represent.
    Formats,
}

/// Arguments for the `convert` command.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input document, or `-` for standard input.
    pub input: String,

    /// Output document, or `-` for standard output.
    pub output: String,

    /// Input format name (defaults to the input file extension).
    #[arg(long)]
    pub from: Option<String>,

    /// Output format name (defaults to the output file extension).
    #[arg(long)]
    pub to: Option<String>,

    /// YAML file with node options (ordering, collapsing, strictness, indent).
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Fail instead of coercing values the output format cannot represent.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `tree` command.
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Input document, or `-` for standard input.
    pub input: String,

    /// Input format name (defaults to the input file extension).
    #[arg(long)]
    pub from: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
