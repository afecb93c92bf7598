//! # NFS Debug Registration Service
//!
//! This service mirrors the lifecycle of client connections and mounted
//! servers into a debug-inspection tree: one directory per object, relative
//! symlinks into the RPC layer, and a writable `failed` attribute file per
//! client.
//!
//! ## Philosophy
//!
//! - **Inspection never gates function**: Registration failure leaves the
//!   object without a debug entry, which is always a safe degraded state.
//! - **Soft failures are outcomes, not errors**: Every intentional skip is
//!   reported as a distinct [`RegisterOutcome`] / [`LinkOutcome`] variant so
//!   callers can tell "not linked on purpose" from "errored".
//! - **No retries, no reconciliation**: A missed back-link stays missed;
//!   ordering gaps between collaborators are tolerated, not repaired.
//!
//! ## Tree layout
//!
//! ```text
//! nfs/
//!   nfs_client/<client-hex-id>/{rpc_client, failed}
//!   nfs_server/<server-hex-id>/{rpc_client, rpc_client_acl, nfs_client}
//! ```
//!
//! Symlink targets are relative (`../../../sunrpc/rpc_clnt/<name>`,
//! `../../nfs_client/<name>`) so the tree stays valid wherever the root is
//! mounted.

pub mod client;
pub mod failed;
pub mod outcome;
pub mod registry;
pub mod rpc;
pub mod server;

pub use client::NfsClient;
pub use failed::{FailedFlagFile, SharedFailedFlag, TransitionHook};
pub use outcome::{LinkOutcome, LinkSkip, RegisterOutcome, SkipReason};
pub use registry::{link_rpc_client, DebugRegistry};
pub use rpc::RpcClientRef;
pub use server::NfsServer;
