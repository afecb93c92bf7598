//! RPC transport collaborator reference
//!
//! The RPC-connection object registers its own debug entry independently of
//! this service; all we observe is whether it is alive and whether that
//! entry exists yet.

use serde::{Deserialize, Serialize};

/// Reference to an RPC transport as seen by the debug registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcClientRef {
    /// Construction of the transport failed; carries no debug entry
    Errored,
    /// Live transport that has not self-registered a debug entry yet
    Unregistered,
    /// Live transport with a registered debug entry name
    Registered(String),
}

impl RpcClientRef {
    /// Convenience constructor for a self-registered transport
    pub fn registered(entry: impl Into<String>) -> Self {
        Self::Registered(entry.into())
    }

    /// Name of the transport's own debug entry, if it has one
    pub fn debug_entry(&self) -> Option<&str> {
        match self {
            RpcClientRef::Registered(entry) => Some(entry.as_str()),
            _ => None,
        }
    }

    /// Whether the reference is error-valued
    pub fn is_errored(&self) -> bool {
        matches!(self, RpcClientRef::Errored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_entry_visibility() {
        assert_eq!(RpcClientRef::Errored.debug_entry(), None);
        assert_eq!(RpcClientRef::Unregistered.debug_entry(), None);
        assert_eq!(
            RpcClientRef::registered("1a2b").debug_entry(),
            Some("1a2b")
        );
    }

    #[test]
    fn test_errored_detection() {
        assert!(RpcClientRef::Errored.is_errored());
        assert!(!RpcClientRef::Unregistered.is_errored());
        assert!(!RpcClientRef::registered("x").is_errored());
    }
}
