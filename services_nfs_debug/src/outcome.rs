//! Registration and link outcomes
//!
//! Soft-failure paths are first-class variants rather than booleans, so the
//! difference between "intentionally not created" and "the facility refused"
//! is visible to callers and tests.

use debug_tree::NodeId;

/// Result of attempting to register an object's debug directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new directory was created and handed to the object
    Registered(NodeId),
    /// Registration was intentionally skipped
    Skipped(SkipReason),
    /// The facility rejected the directory or a mandatory child failed
    Failed,
}

impl RegisterOutcome {
    /// Whether a directory was created
    pub fn is_registered(&self) -> bool {
        matches!(self, RegisterOutcome::Registered(_))
    }
}

/// Why a registration was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The object already owns a debug directory
    AlreadyRegistered,
    /// The parent subdirectory was never successfully created
    FacilityUnavailable,
    /// The identifier renders wider than a debug name allows
    IdentifierTooWide,
}

/// Result of attempting to create an RPC-layer symlink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The symlink was created
    Created(NodeId),
    /// The link was intentionally omitted
    Skipped(LinkSkip),
    /// The facility rejected the symlink
    Failed,
}

impl LinkOutcome {
    /// Whether a symlink was created
    pub fn is_created(&self) -> bool {
        matches!(self, LinkOutcome::Created(_))
    }
}

/// Why an RPC-layer link was omitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSkip {
    /// The RPC reference is error-valued
    RpcErrored,
    /// The RPC object has not self-registered a debug entry yet
    RpcNotRegistered,
    /// The composed target exceeds the fixed path bound
    TargetTooLong,
}
