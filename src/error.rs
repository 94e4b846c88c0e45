//! Error types for cfgtree.
//!
//! Uses thiserror for derive macros. Every variant maps to a CLI exit code so
//! the conversion tool can report failures without inspecting messages.

use crate::exit_codes;
use crate::node::NodeType;
use thiserror::Error;

/// Main error type for node, codec and loader operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed input while decoding a document.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// An operation is incompatible with the node's current type.
    #[error("wrong node type at '{path}': expected {expected}, found {found}")]
    WrongNodeType {
        path: String,
        expected: String,
        found: NodeType,
    },

    /// Strict-mode encode met a value the format cannot represent natively.
    #[error("{format} cannot represent the value at '{path}': {reason}")]
    UnsupportedValue {
        format: String,
        path: String,
        reason: String,
    },

    /// No codec is registered under the requested format name.
    #[error("unknown format '{name}' (known formats: {known})")]
    NotFound { name: String, known: String },

    /// Reading a source or writing a sink failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Converting between a node and a typed value failed.
    #[error("mapping failed at '{path}': {message}")]
    Mapping { path: String, message: String },

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),
}

impl ConfigError {
    /// Wrap an I/O error with a description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ConfigError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Parse { .. } => exit_codes::PARSE_FAILURE,
            ConfigError::UnsupportedValue { .. } => exit_codes::ENCODE_FAILURE,
            ConfigError::Io { .. } => exit_codes::IO_FAILURE,
            ConfigError::WrongNodeType { .. }
            | ConfigError::NotFound { .. }
            | ConfigError::Mapping { .. }
            | ConfigError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for cfgtree operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
