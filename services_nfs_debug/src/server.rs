//! Mounted server collaborator

use crate::rpc::RpcClientRef;
use core_types::ServerId;
use debug_tree::NodeId;

/// A mounted server as seen by the debug registry
///
/// Carries two RPC transport references: the data transport and the
/// separate ACL transport.
pub struct NfsServer {
    id: ServerId,
    rpc: RpcClientRef,
    rpc_acl: RpcClientRef,
    debug_dir: Option<NodeId>,
}

impl NfsServer {
    /// Creates a server with no debug directory
    pub fn new(id: ServerId, rpc: RpcClientRef, rpc_acl: RpcClientRef) -> Self {
        Self {
            id,
            rpc,
            rpc_acl,
            debug_dir: None,
        }
    }

    /// The server's identifier
    pub fn id(&self) -> ServerId {
        self.id
    }

    /// The data RPC transport reference
    pub fn rpc(&self) -> &RpcClientRef {
        &self.rpc
    }

    /// The ACL RPC transport reference
    pub fn rpc_acl(&self) -> &RpcClientRef {
        &self.rpc_acl
    }

    /// The server's debug directory handle, if registered
    pub fn debug_dir(&self) -> Option<NodeId> {
        self.debug_dir
    }

    pub(crate) fn set_debug_dir(&mut self, dir: NodeId) {
        self.debug_dir = Some(dir);
    }

    pub(crate) fn take_debug_dir(&mut self) -> Option<NodeId> {
        self.debug_dir.take()
    }
}
