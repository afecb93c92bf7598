//! Unique identifiers for NFS runtime objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of hex digits a debug directory name may carry.
///
/// Identifiers wider than this cannot be represented in the debug tree
/// and registration is silently skipped for them.
pub const MAX_DEBUG_NAME_WIDTH: usize = 8;

/// Unique identifier for a client connection
///
/// Clients are long-lived connection objects; their identifier names the
/// per-client directory in the debug tree, rendered as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(u64);

impl ClientId {
    /// Creates a client ID from a raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Renders the identifier as unpadded lowercase hex
    pub fn as_hex(&self) -> String {
        format!("{:x}", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client({:x})", self.0)
    }
}

/// Unique identifier for a mounted server
///
/// Servers are per-mount objects owned by a client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerId(u64);

impl ServerId {
    /// Creates a server ID from a raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Renders the identifier as unpadded lowercase hex
    pub fn as_hex(&self) -> String {
        format!("{:x}", self.0)
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Server({:x})", self.0)
    }
}
