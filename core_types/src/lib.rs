//! # Core Types
//!
//! This crate defines the fundamental identifiers used throughout the
//! NFS debug registration workspace.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Client and server identifiers are distinct
//!   types and cannot be confused.
//! - **Bounded names**: The debug tree only admits directory names up to a
//!   fixed hex width, so that bound lives next to the identifiers it
//!   constrains.
//!
//! ## Key Types
//!
//! - [`ClientId`]: Unique identifier for a client connection
//! - [`ServerId`]: Unique identifier for a mounted server
//! - [`MAX_DEBUG_NAME_WIDTH`]: Maximum hex digits in a debug directory name

pub mod ids;

pub use ids::{ClientId, ServerId, MAX_DEBUG_NAME_WIDTH};
