//! Implementation of the `cfgtree convert` command.

use super::{codec_for, require_input};
use crate::cli::ConvertArgs;
use cfgtree::error::Result;
use cfgtree::format::Codec;
use cfgtree::loader::{Loader, Location, Saver};
use cfgtree::options::NodeOptions;
use std::sync::Arc;

/// Execute the `cfgtree convert` command.
///
/// Both codecs are resolved before anything is read, and the output is only
/// written once the whole document has been encoded.
pub fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let mut options = match &args.options {
        Some(path) => NodeOptions::load(path)?,
        None => NodeOptions::default(),
    };
    if args.strict {
        options = options.with_strict_native_types(true);
    }
    options.validate()?;

    let input = Location::from_arg(&args.input);
    let output = Location::from_arg(&args.output);
    let source = codec_for(&input, args.from.as_deref(), "--from")?;
    let target = codec_for(&output, args.to.as_deref(), "--to")?;
    require_input(&input)?;

    tracing::info!(
        input = %input,
        output = %output,
        from = source.name(),
        to = target.name(),
        "converting"
    );

    let node = Loader::new(source, input)
        .with_options(Arc::new(options))
        .load()?;
    Saver::new(target, output).save(&node)
}
