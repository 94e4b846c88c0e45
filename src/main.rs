//! cfgtree: convert and inspect configuration documents.
//!
//! This is the main entry point for the `cfgtree` CLI. It parses arguments,
//! installs logging, dispatches to the command handler, and maps errors to
//! exit codes.

mod cli;
mod commands;

use cfgtree::exit_codes;
use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr; `RUST_LOG` adds directives on top of the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "cfgtree=warn",
        1 => "cfgtree=info",
        2 => "cfgtree=debug",
        _ => "cfgtree=trace",
    };
    let directive: Directive = level.parse().unwrap_or_else(|_| LevelFilter::WARN.into());
    let filter = EnvFilter::from_default_env().add_directive(directive);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
