//! Loading and saving documents.
//!
//! A [`Loader`] pairs a codec with a [`Location`] and the options new trees
//! are created with; a [`Saver`] does the reverse. File handles never
//! outlive a call.


use crate::error::{ConfigError, Result};
use crate::format::{Codec, FormatRegistry};
use crate::fs::atomic_write;
use crate::node::ConfigurationNode;
use crate::options::NodeOptions;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a document is read from or written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    /// Standard input when loading, standard output when saving.
    Stdio,
}

impl Location {
    /// Interpret a command-line argument; `-` means standard input/output.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Location::Stdio
        } else {
            Location::File(PathBuf::from(arg))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Location::File(path) => Some(path),
            Location::Stdio => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Stdio => f.write_str("<stdio>"),
        }
    }
}

/// Reads a document from a location with one codec.
#[derive(Debug, Clone)]
pub struct Loader {
    codec: Arc<dyn Codec>,
    location: Location,
    options: Arc<NodeOptions>,
}

impl Loader {
    pub fn new(codec: Arc<dyn Codec>, location: Location) -> Self {
        Self {
            codec,
            location,
            options: Arc::new(NodeOptions::default()),
        }
    }

    /// Loader for a file whose format is picked from its extension.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let codec = FormatRegistry::global().for_path(path)?;
        Ok(Self::new(codec, Location::File(path.to_path_buf())))
    }

    /// Options shared by every node this loader creates.
    pub fn with_options(mut self, options: Arc<NodeOptions>) -> Self {
        self.options = options;
        self
    }

    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn options(&self) -> &Arc<NodeOptions> {
        &self.options
    }

    /// An empty root carrying this loader's options.
    pub fn create_node(&self) -> ConfigurationNode {
        ConfigurationNode::root_with(Arc::clone(&self.options))
    }

    /// Read and decode the whole document.
    ///
    /// A file that does not exist loads as an empty root.
    pub fn load(&self) -> Result<ConfigurationNode> {
        let options = Arc::clone(&self.options);
        let node = match &self.location {
            Location::File(path) => {
                let file = match File::open(path) {
                    Ok(file) => file,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        tracing::debug!(path = %path.display(), "source missing, starting from an empty tree");
                        return Ok(self.create_node());
                    }
                    Err(e) => {
                        return Err(ConfigError::io(
                            format!("failed to open '{}'", path.display()),
                            e,
                        ));
                    }
                };
                self.codec.decode(&mut BufReader::new(file), options)?
            }
            Location::Stdio => self.codec.decode(&mut io::stdin().lock(), options)?,
        };

        tracing::debug!(
            location = %self.location,
            format = self.codec.name(),
            node_type = %node.node_type(),
            "loaded document"
        );
        Ok(node)
    }
}

/// Encodes a tree and writes it to a location.
#[derive(Debug, Clone)]
pub struct Saver {
    codec: Arc<dyn Codec>,
    location: Location,
}

impl Saver {
    pub fn new(codec: Arc<dyn Codec>, location: Location) -> Self {
        Self { codec, location }
    }

    /// Saver for a file whose format is picked from its extension.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let codec = FormatRegistry::global().for_path(path)?;
        Ok(Self::new(codec, Location::File(path.to_path_buf())))
    }

    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Encode `node` and write it out.
    ///
    /// The document is fully encoded before anything is written, so an
    /// encode failure leaves an existing file untouched.
    pub fn save(&self, node: &ConfigurationNode) -> Result<()> {
        let mut buffer = Vec::new();
        self.codec.encode(node, &mut buffer)?;

        match &self.location {
            Location::File(path) => atomic_write(path, &buffer)?,
            Location::Stdio => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(&buffer)
                    .and_then(|()| stdout.flush())
                    .map_err(|e| ConfigError::io("failed to write to standard output", e))?;
            }
        }

        tracing::debug!(
            location = %self.location,
            format = self.codec.name(),
            bytes = buffer.len(),
            "saved document"
        );
        Ok(())
    }
}
