//! Root lifecycle and per-object registration
//!
//! The registry holds the three process-wide directory handles (top,
//! client subdirectory, server subdirectory) and attaches or detaches one
//! directory per client or server at their lifecycle points.

use crate::client::NfsClient;
use crate::failed::FailedFlagFile;
use crate::outcome::{LinkOutcome, LinkSkip, RegisterOutcome, SkipReason};
use crate::rpc::RpcClientRef;
use crate::server::NfsServer;
use core_types::MAX_DEBUG_NAME_WIDTH;
use debug_tree::{DebugTree, FileMode, NodeId};

const TOP_DIR_NAME: &str = "nfs";
const CLIENT_DIR_NAME: &str = "nfs_client";
const SERVER_DIR_NAME: &str = "nfs_server";

/// Fixed-depth path from a per-object directory to the RPC layer's entries
const RPC_CLNT_PREFIX: &str = "../../../sunrpc/rpc_clnt/";
/// Path from a server directory back to the owning client's directory
const CLIENT_LINK_PREFIX: &str = "../../nfs_client/";

const RPC_TARGET_MAX: usize = RPC_CLNT_PREFIX.len() + MAX_DEBUG_NAME_WIDTH;
const CLIENT_LINK_MAX: usize = CLIENT_LINK_PREFIX.len() + MAX_DEBUG_NAME_WIDTH;

/// Creates a relative symlink to an RPC transport's own debug entry
///
/// Tolerates an errored reference and a transport that has not registered
/// itself yet; both are normal, silent cases.
pub fn link_rpc_client(
    tree: &mut DebugTree,
    name: &str,
    rpc: &RpcClientRef,
    parent: NodeId,
) -> LinkOutcome {
    if rpc.is_errored() {
        return LinkOutcome::Skipped(LinkSkip::RpcErrored);
    }
    let Some(entry) = rpc.debug_entry() else {
        return LinkOutcome::Skipped(LinkSkip::RpcNotRegistered);
    };

    let target = format!("{}{}", RPC_CLNT_PREFIX, entry);
    if target.len() > RPC_TARGET_MAX {
        return LinkOutcome::Skipped(LinkSkip::TargetTooLong);
    }

    match tree.create_symlink(name, parent, &target) {
        Ok(id) => LinkOutcome::Created(id),
        Err(_) => LinkOutcome::Failed,
    }
}

/// Process-wide debug registration state
///
/// All three handles are absent until [`initialize`](DebugRegistry::initialize)
/// succeeds; every registration is a no-op while they stay absent.
pub struct DebugRegistry {
    top: Option<NodeId>,
    client_dir: Option<NodeId>,
    server_dir: Option<NodeId>,
}

impl DebugRegistry {
    /// Creates an uninitialized registry
    pub fn new() -> Self {
        Self {
            top: None,
            client_dir: None,
            server_dir: None,
        }
    }

    /// Creates the `nfs/{nfs_client,nfs_server}` hierarchy
    ///
    /// Failure leaves the feature disabled without affecting the caller: if
    /// the top directory cannot be created nothing else is attempted, and if
    /// either subdirectory fails the whole subtree is removed again.
    pub fn initialize(&mut self, tree: &mut DebugTree) {
        if self.top.is_some() {
            return;
        }

        let Ok(top) = tree.create_dir(TOP_DIR_NAME, None) else {
            return;
        };

        let server_dir = tree.create_dir(SERVER_DIR_NAME, Some(top));
        let client_dir = tree.create_dir(CLIENT_DIR_NAME, Some(top));

        match (server_dir, client_dir) {
            (Ok(server_dir), Ok(client_dir)) => {
                self.top = Some(top);
                self.server_dir = Some(server_dir);
                self.client_dir = Some(client_dir);
            }
            _ => {
                tree.remove_recursive(top);
            }
        }
    }

    /// Removes the whole hierarchy and resets all handles
    ///
    /// Idempotent; safe to call before `initialize` ever succeeded.
    pub fn shutdown(&mut self, tree: &mut DebugTree) {
        if let Some(top) = self.top.take() {
            tree.remove_recursive(top);
        }
        self.client_dir = None;
        self.server_dir = None;
    }

    /// Whether the hierarchy is currently in place
    pub fn is_initialized(&self) -> bool {
        self.top.is_some()
    }

    /// Handle of the `nfs_client` subdirectory, if initialized
    pub fn client_root(&self) -> Option<NodeId> {
        self.client_dir
    }

    /// Handle of the `nfs_server` subdirectory, if initialized
    pub fn server_root(&self) -> Option<NodeId> {
        self.server_dir
    }

    /// Registers a client's debug directory
    ///
    /// Creates `nfs_client/<hex-id>` with a best-effort `rpc_client` symlink
    /// and a mandatory writable `failed` attribute file. If the attribute
    /// file cannot be created the directory is rolled back and the client is
    /// left unregistered.
    pub fn register_client(&self, tree: &mut DebugTree, client: &mut NfsClient) -> RegisterOutcome {
        if client.debug_dir().is_some() {
            return RegisterOutcome::Skipped(SkipReason::AlreadyRegistered);
        }
        let Some(parent) = self.client_dir else {
            return RegisterOutcome::Skipped(SkipReason::FacilityUnavailable);
        };

        let name = client.id().as_hex();
        if name.len() > MAX_DEBUG_NAME_WIDTH {
            return RegisterOutcome::Skipped(SkipReason::IdentifierTooWide);
        }

        let Ok(dir) = tree.create_dir(&name, Some(parent)) else {
            return RegisterOutcome::Failed;
        };

        link_rpc_client(tree, "rpc_client", client.rpc(), dir);

        let file = FailedFlagFile::new(client.failed_flag(), client.transition_hook());
        if tree
            .create_file("failed", FileMode::ReadWrite, dir, Box::new(file))
            .is_err()
        {
            tree.remove_recursive(dir);
            return RegisterOutcome::Failed;
        }

        client.set_debug_dir(dir);
        RegisterOutcome::Registered(dir)
    }

    /// Removes a client's debug directory and everything in it
    ///
    /// Always succeeds from the caller's perspective; a no-op when the
    /// client was never registered.
    pub fn unregister_client(&self, tree: &mut DebugTree, client: &mut NfsClient) {
        if let Some(dir) = client.take_debug_dir() {
            tree.remove_recursive(dir);
        }
    }

    /// Registers a server's debug directory
    ///
    /// Creates `nfs_server/<hex-id>` with best-effort `rpc_client` and
    /// `rpc_client_acl` symlinks. If the owning client has a debug
    /// directory, a mandatory `nfs_client` back-link is added; failure to
    /// create it rolls the whole server directory back. An owner without a
    /// debug directory is tolerated and the back-link is simply omitted.
    pub fn register_server(
        &self,
        tree: &mut DebugTree,
        server: &mut NfsServer,
        owner: &NfsClient,
    ) -> RegisterOutcome {
        if server.debug_dir().is_some() {
            return RegisterOutcome::Skipped(SkipReason::AlreadyRegistered);
        }
        let Some(parent) = self.server_dir else {
            return RegisterOutcome::Skipped(SkipReason::FacilityUnavailable);
        };

        let name = server.id().as_hex();
        if name.len() > MAX_DEBUG_NAME_WIDTH {
            return RegisterOutcome::Skipped(SkipReason::IdentifierTooWide);
        }

        let Ok(dir) = tree.create_dir(&name, Some(parent)) else {
            return RegisterOutcome::Failed;
        };

        link_rpc_client(tree, "rpc_client", server.rpc(), dir);
        link_rpc_client(tree, "rpc_client_acl", server.rpc_acl(), dir);

        if let Some(owner_dir) = owner.debug_dir() {
            if let Some(owner_name) = tree.node_name(owner_dir).map(str::to_string) {
                let target = format!("{}{}", CLIENT_LINK_PREFIX, owner_name);
                if target.len() > CLIENT_LINK_MAX
                    || tree.create_symlink("nfs_client", dir, &target).is_err()
                {
                    tree.remove_recursive(dir);
                    return RegisterOutcome::Failed;
                }
            }
        }

        server.set_debug_dir(dir);
        RegisterOutcome::Registered(dir)
    }

    /// Removes a server's debug directory and everything in it
    pub fn unregister_server(&self, tree: &mut DebugTree, server: &mut NfsServer) {
        if let Some(dir) = server.take_debug_dir() {
            tree.remove_recursive(dir);
        }
    }
}

impl Default for DebugRegistry {
    fn default() -> Self {
        Self::new()
    }
}
