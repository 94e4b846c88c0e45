//! Comment recovery for YAML documents.
//!
//! serde_yaml discards comments, so after decoding the text is scanned line
//! by line. A block of `#` lines directly above a mapping key becomes that
//! entry's comment. The first comment block of the document followed by a
//! blank line becomes the root comment. Sequence items, block scalars and
//! flow collections are skipped, so entries below a list keep no comment.
//! Trailing comments on the same line as a value (`port: 80 # tcp`) are not
//! recovered and are lost on decode.
//!
//! Plain keys are resolved the way the decoder resolves them, so `~: 1`
//! matches the node stored under `null` and `0x1F: x` the node under 31.

use crate::node::{ConfigurationNode, NodeKey};
use regex::Regex;
use std::sync::LazyLock;

static KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r##"^(?P<key>"(?:[^"\\]|\\.)*"|'(?:[^']|'')*'|[^\s#'"\[\]{},&*!|>%@`?](?:\S|\s+[^\s#])*?)\s*:(?:\s+(?P<rest>.*))?$"##,
    )
    .expect("Invalid YAML key regex")
});

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)(?:[eE][-+]?[0-9]+)?$")
        .expect("Invalid YAML float regex")
});

/// Attach recovered comments to `root`; returns how many were attached.
pub(super) fn attach(root: &mut ConfigurationNode, text: &str) -> usize {
    let mut scanner = Scanner::default();
    for line in text.lines() {
        scanner.line(root, line);
    }
    scanner.finish(root);
    scanner.attached
}

#[derive(Default)]
struct Scanner {
    /// Enclosing mapping keys with the column they were found at.
    stack: Vec<(usize, NodeKey)>,
    pending: Vec<String>,
    /// Lines indented deeper than this belong to a skipped value.
    skip_deeper_than: Option<usize>,
    seen_content: bool,
    attached: usize,
}

impl Scanner {
    fn line(&mut self, root: &mut ConfigurationNode, line: &str) {
        let trimmed = line.trim_start();
        let column = line.len() - trimmed.len();
        let trimmed = trimmed.trim_end();

        if let Some(floor) = self.skip_deeper_than {
            if trimmed.is_empty() || column > floor {
                return;
            }
            self.skip_deeper_than = None;
        }

        if trimmed.is_empty() {
            if !self.seen_content && root.comment().is_none() {
                self.take_root_comment(root);
            }
            self.pending.clear();
            return;
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            let comment = comment.strip_prefix(' ').unwrap_or(comment);
            self.pending.push(comment.to_string());
            return;
        }

        if trimmed == "---" || trimmed.starts_with("--- ") || trimmed == "..." {
            self.stack.clear();
            self.pending.clear();
            return;
        }

        self.seen_content = true;

        if trimmed == "-" || trimmed.starts_with("- ") {
            self.pending.clear();
            self.skip_deeper_than = Some(column);
            return;
        }

        let Some(captures) = KEY_LINE.captures(trimmed) else {
            // Whatever this is, lines nested under it cannot be placed.
            self.pending.clear();
            self.skip_deeper_than = Some(column);
            return;
        };

        while self.stack.last().is_some_and(|(depth, _)| *depth >= column) {
            self.stack.pop();
        }
        let key = parse_key(&captures["key"]);

        if !self.pending.is_empty() {
            let comment = self.pending.join("\n");
            self.pending.clear();
            let path = self.stack.iter().map(|(_, k)| k).chain(std::iter::once(&key));
            if let Some(node) = root.get_mut(path) {
                node.set_comment(comment);
                self.attached += 1;
            }
        }

        match captures.name("rest").map(|rest| rest.as_str().trim()) {
            Some(rest) if !rest.is_empty() && !rest.starts_with('#') => {
                // Scalar, block scalar or flow collection; any continuation
                // lines are deeper than the key.
                self.skip_deeper_than = Some(column);
            }
            _ => self.stack.push((column, key)),
        }
    }

    fn finish(&mut self, root: &mut ConfigurationNode) {
        if !self.seen_content && root.comment().is_none() {
            self.take_root_comment(root);
        }
    }

    fn take_root_comment(&mut self, root: &mut ConfigurationNode) {
        if self.pending.is_empty() {
            return;
        }
        root.set_comment(self.pending.join("\n"));
        self.pending.clear();
        self.attached += 1;
    }
}

fn parse_key(raw: &str) -> NodeKey {
    let raw = raw.trim();
    if raw.starts_with('"') {
        return match serde_json::from_str::<String>(raw) {
            Ok(key) => NodeKey::Name(key),
            Err(_) => NodeKey::Name(raw.trim_matches('"').to_string()),
        };
    }
    if let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        return NodeKey::Name(inner.replace("''", "'"));
    }
    plain_key(raw)
}

/// Resolve an unquoted key to the key the decoder stores it under.
fn plain_key(raw: &str) -> NodeKey {
    match raw {
        "" | "~" | "null" | "Null" | "NULL" => return NodeKey::Name("null".to_string()),
        "true" | "True" | "TRUE" => return NodeKey::Name("true".to_string()),
        "false" | "False" | "FALSE" => return NodeKey::Name("false".to_string()),
        _ => {}
    }

    if let Ok(int) = raw.parse::<i64>() {
        return NodeKey::Int(int);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let radix = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(prefix).map(|rest| (rest, radix)));
    if let Some((digits, radix)) = radix
        && let Ok(int) = i64::from_str_radix(digits, radix)
    {
        return NodeKey::Int(if negative { -int } else { int });
    }
    if let Ok(big) = raw.parse::<u64>() {
        return NodeKey::Name(big.to_string());
    }

    let float = match raw {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ if FLOAT.is_match(raw) => raw.parse::<f64>().ok(),
        _ => None,
    };
    match float {
        Some(float) => NodeKey::Name(float.to_string()),
        None => NodeKey::Name(raw.to_string()),
    }
}
