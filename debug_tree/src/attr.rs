//! Attribute file hooks
//!
//! Attribute files expose a single piece of collaborator state as a tiny
//! text endpoint. The tree stores a boxed handler per file and dispatches
//! reads and writes to it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by attribute file handlers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttrError {
    /// Written text did not parse as a valid value
    #[error("invalid value: {0:?}")]
    InvalidValue(String),

    /// The file does not accept writes
    #[error("attribute is read-only")]
    ReadOnly,
}

/// Access mode of an attribute file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileMode {
    /// Readable only
    ReadOnly,
    /// Readable and writable
    ReadWrite,
}

/// Read/write hooks backing an attribute file
///
/// `read` renders the current value as text; `write` parses caller-supplied
/// text and applies it, leaving state untouched on parse failure.
pub trait AttrHandler {
    /// Renders the current value
    fn read(&self) -> String;

    /// Parses and applies a new value
    fn write(&mut self, input: &str) -> Result<(), AttrError>;
}
