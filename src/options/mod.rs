//! Serialization options shared by every node of a graph.
//!
//! `NodeOptions` is immutable once built; a graph holds it behind an `Arc`
//! so any number of nodes, graphs and threads can share one instance.
//! Options can also be read from a YAML file; unknown fields are ignored for
//! forward compatibility and missing fields take their defaults.

mod model;
mod operations;


pub use model::{MAX_INDENT, MapOrdering, NodeOptions};
