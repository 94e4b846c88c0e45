//! Implementation of the `cfgtree formats` command.

use cfgtree::error::Result;
use cfgtree::format::{Codec, FormatRegistry};
use cfgtree::format::capabilities::{FormatCapabilities, KNOWN_FORMATS};

/// Execute the `cfgtree formats` command.
///
/// Lists registered codecs first, then formats that are only described.
pub fn cmd_formats() -> Result<()> {
    print!("{}", render(FormatRegistry::global()));
    Ok(())
}

fn render(registry: &FormatRegistry) -> String {
    let mut out = String::new();

    for codec in registry.codecs() {
        let mut header = codec.name().to_string();
        if !codec.aliases().is_empty() {
            header.push_str(&format!(" (aliases: {})", codec.aliases().join(", ")));
        }
        let extensions: Vec<String> = codec.extensions().iter().map(|e| format!(".{}", e)).collect();
        out.push_str(&format!("{}\n  extensions: {}\n", header, extensions.join(" ")));
        describe(&mut out, codec.capabilities());
    }

    let registered = registry.names();
    for capabilities in KNOWN_FORMATS
        .iter()
        .filter(|c| !registered.contains(&c.name))
    {
        out.push_str(&format!("{} (no codec)\n", capabilities.name));
        describe(&mut out, capabilities);
    }
    out
}

fn describe(out: &mut String, capabilities: &FormatCapabilities) {
    let scalars: Vec<String> = capabilities.scalars.iter().map(|k| k.to_string()).collect();
    out.push_str(&format!("  scalars: {}\n", scalars.join(", ")));
    out.push_str(&format!(
        "  comments: {}, non-finite floats: {}, non-string keys: {}\n",
        yes_no(capabilities.comments),
        yes_no(capabilities.non_finite_floats),
        yes_no(!capabilities.string_keys_only)
    ));
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_codecs_then_descriptors() {
        let text = render(&FormatRegistry::default());

        assert!(text.starts_with("json (aliases: gson)\n  extensions: .json\n"));
        assert!(text.contains("yaml (aliases: yml)\n  extensions: .yaml .yml\n"));
        assert!(text.contains("hocon (no codec)\n"));
        assert!(text.contains("xml (no codec)\n  scalars: boolean, integer, float, string\n"));
        assert!(text.contains("  comments: no, non-finite floats: no, non-string keys: no\n"));
    }
}
