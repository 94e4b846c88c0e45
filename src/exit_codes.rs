//! Exit code constants for the cfgtree CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown format, node misuse)
//! - 2: Parse failure while decoding an input document
//! - 3: Encode failure (value not representable in the target format)
//! - 4: I/O failure reading or writing a document

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown format, or invalid node operation.
pub const USER_ERROR: i32 = 1;

/// Parse failure: the input document is malformed.
pub const PARSE_FAILURE: i32 = 2;

/// Encode failure: strict mode rejected a value the target format cannot hold.
pub const ENCODE_FAILURE: i32 = 3;

/// I/O failure: a source could not be read or a sink could not be written.
pub const IO_FAILURE: i32 = 4;
