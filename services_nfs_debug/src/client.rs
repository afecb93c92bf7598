//! Client connection collaborator
//!
//! The debug registry only reads the client's identifier and RPC reference
//! and writes back one opaque directory handle; everything else belongs to
//! the client's real owner.

use crate::failed::{SharedFailedFlag, TransitionHook};
use crate::rpc::RpcClientRef;
use core_types::ClientId;
use debug_tree::NodeId;

/// A client connection as seen by the debug registry
pub struct NfsClient {
    id: ClientId,
    rpc: RpcClientRef,
    failed: SharedFailedFlag,
    on_failed: Option<TransitionHook>,
    debug_dir: Option<NodeId>,
}

impl NfsClient {
    /// Creates a client with an unset failed flag and no debug directory
    pub fn new(id: ClientId, rpc: RpcClientRef) -> Self {
        Self {
            id,
            rpc,
            failed: SharedFailedFlag::default(),
            on_failed: None,
            debug_dir: None,
        }
    }

    /// Installs the state-transition hook invoked on failed-flag writes
    pub fn with_transition_hook(mut self, hook: TransitionHook) -> Self {
        self.on_failed = Some(hook);
        self
    }

    /// The client's identifier
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// The client's RPC transport reference
    pub fn rpc(&self) -> &RpcClientRef {
        &self.rpc
    }

    /// Shared handle to the failed flag
    pub fn failed_flag(&self) -> SharedFailedFlag {
        self.failed.clone()
    }

    /// Current value of the failed flag
    pub fn is_failed(&self) -> bool {
        self.failed.get()
    }

    /// The client's debug directory handle, if registered
    pub fn debug_dir(&self) -> Option<NodeId> {
        self.debug_dir
    }

    pub(crate) fn transition_hook(&self) -> Option<TransitionHook> {
        self.on_failed.clone()
    }

    pub(crate) fn set_debug_dir(&mut self, dir: NodeId) {
        self.debug_dir = Some(dir);
    }

    pub(crate) fn take_debug_dir(&mut self) -> Option<NodeId> {
        self.debug_dir.take()
    }
}
