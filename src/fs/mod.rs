//! Filesystem utilities.
//!
//! Saved documents are written atomically so a failed save never leaves a
//! truncated configuration file behind.

pub mod atomic;

pub use atomic::atomic_write;
