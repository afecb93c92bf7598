//! # Debug Tree
//!
//! This crate provides the hierarchical registration facility backing the
//! debug-inspection hierarchy: an in-memory tree of directories, relative
//! symlinks, and attribute files, addressed through opaque node handles.
//!
//! ## Philosophy
//!
//! - **Handles, not paths**: Callers hold opaque [`NodeId`] handles; paths
//!   are only ever rendered for humans.
//! - **Ownership is a subtree**: Removing a handle removes everything nested
//!   beneath it in one call.
//! - **Inspection only**: Nothing in the system depends on this tree
//!   existing; it is a view, not a source of truth.
//!
//! ## Operations
//!
//! - `create_dir(name, parent)`: Create a directory (top-level when no parent)
//! - `create_symlink(name, parent, target)`: Create a relative symlink
//! - `create_file(name, mode, parent, handler)`: Create an attribute file
//! - `remove_recursive(id)`: Remove a node and its whole subtree
//! - `read_file(id)` / `write_file(id, input)`: Attribute file access

pub mod attr;
pub mod node;
pub mod tree;

pub use attr::{AttrError, AttrHandler, FileMode};
pub use node::{NodeId, NodeKind};
pub use tree::{CreateFailurePolicy, DebugTree, TreeError};
