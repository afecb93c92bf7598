//! Tree construction and removal
//!
//! The tree is an arena of nodes indexed by [`NodeId`], with directories
//! holding name-keyed child handles. Top-level entries live in a root table
//! and behave like children of an implicit, unremovable root.

use crate::attr::{AttrError, AttrHandler, FileMode};
use crate::node::{NodeId, NodeKind};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while mutating or inspecting the tree
#[derive(Debug, Error)]
pub enum TreeError {
    /// No node with this handle
    #[error("Not found: {0}")]
    NotFound(NodeId),

    /// Parent exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Node exists but is not an attribute file
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// A sibling with this name already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Name is empty or contains forbidden characters
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// Creation refused by the active failure policy
    #[error("Creation rejected: {0}")]
    Rejected(String),

    /// Attribute handler error
    #[error("Attribute error: {0}")]
    Attr(#[from] AttrError),
}

/// Policy for when node creation should fail
///
/// Lets tests exercise the rollback paths of callers without reaching into
/// tree internals.
#[derive(Debug, Clone)]
pub enum CreateFailurePolicy {
    /// Never fail (passthrough)
    Never,
    /// Fail every creation after N successful ones
    AfterCreates(usize),
    /// Fail creations of specific names
    OnNames(Vec<String>),
}

struct DebugNode {
    name: String,
    parent: Option<NodeId>,
    body: NodeBody,
}

enum NodeBody {
    Directory { children: HashMap<String, NodeId> },
    Symlink { target: String },
    File { mode: FileMode, handler: Box<dyn AttrHandler> },
}

impl NodeBody {
    fn kind(&self) -> NodeKind {
        match self {
            NodeBody::Directory { .. } => NodeKind::Directory,
            NodeBody::Symlink { .. } => NodeKind::Symlink,
            NodeBody::File { .. } => NodeKind::File,
        }
    }
}

/// In-memory hierarchical registration facility
///
/// All mutation is synchronous and single-threaded; callers hold opaque
/// handles and the tree owns every node.
pub struct DebugTree {
    nodes: HashMap<NodeId, DebugNode>,
    roots: HashMap<String, NodeId>,
    policy: CreateFailurePolicy,
    create_count: usize,
}

impl DebugTree {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: HashMap::new(),
            policy: CreateFailurePolicy::Never,
            create_count: 0,
        }
    }

    /// Replaces the failure policy and resets its counters
    pub fn set_failure_policy(&mut self, policy: CreateFailurePolicy) {
        self.policy = policy;
        self.create_count = 0;
    }

    /// Number of successful creations since the policy was last set
    pub fn create_count(&self) -> usize {
        self.create_count
    }

    /// Creates a directory under `parent`, or at top level when `parent`
    /// is `None`
    pub fn create_dir(&mut self, name: &str, parent: Option<NodeId>) -> Result<NodeId, TreeError> {
        self.insert_node(
            name,
            parent,
            NodeBody::Directory {
                children: HashMap::new(),
            },
        )
    }

    /// Creates a symlink under `parent` with the given target path
    ///
    /// The target is stored verbatim; relative targets stay valid if the
    /// tree is mounted elsewhere.
    pub fn create_symlink(
        &mut self,
        name: &str,
        parent: NodeId,
        target: &str,
    ) -> Result<NodeId, TreeError> {
        self.insert_node(
            name,
            Some(parent),
            NodeBody::Symlink {
                target: target.to_string(),
            },
        )
    }

    /// Creates an attribute file under `parent` backed by `handler`
    pub fn create_file(
        &mut self,
        name: &str,
        mode: FileMode,
        parent: NodeId,
        handler: Box<dyn AttrHandler>,
    ) -> Result<NodeId, TreeError> {
        self.insert_node(name, Some(parent), NodeBody::File { mode, handler })
    }

    /// Removes a node and everything nested beneath it
    ///
    /// A no-op for handles that are absent or already removed.
    pub fn remove_recursive(&mut self, id: NodeId) {
        let (name, parent) = match self.nodes.get(&id) {
            Some(node) => (node.name.clone(), node.parent),
            None => return,
        };

        match parent {
            None => {
                self.roots.remove(&name);
            }
            Some(parent_id) => {
                if let Some(DebugNode {
                    body: NodeBody::Directory { children },
                    ..
                }) = self.nodes.get_mut(&parent_id)
                {
                    children.remove(&name);
                }
            }
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                if let NodeBody::Directory { children } = node.body {
                    stack.extend(children.into_values());
                }
            }
        }
    }

    /// Checks whether a handle still resolves to a node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Looks up a top-level entry by name
    pub fn root(&self, name: &str) -> Option<NodeId> {
        self.roots.get(name).copied()
    }

    /// Returns the name of a node
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|node| node.name.as_str())
    }

    /// Returns the kind of a node
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(&id).map(|node| node.body.kind())
    }

    /// Looks up a child of a directory by name
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        match &self.nodes.get(&parent)?.body {
            NodeBody::Directory { children } => children.get(name).copied(),
            _ => None,
        }
    }

    /// Lists the child names of a directory, sorted
    pub fn children(&self, parent: NodeId) -> Result<Vec<String>, TreeError> {
        let node = self.nodes.get(&parent).ok_or(TreeError::NotFound(parent))?;
        match &node.body {
            NodeBody::Directory { children } => {
                let mut names: Vec<String> = children.keys().cloned().collect();
                names.sort();
                Ok(names)
            }
            _ => Err(TreeError::NotADirectory(node.name.clone())),
        }
    }

    /// Returns the target of a symlink
    pub fn symlink_target(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(&id)?.body {
            NodeBody::Symlink { target } => Some(target.as_str()),
            _ => None,
        }
    }

    /// Reads an attribute file through its handler
    pub fn read_file(&self, id: NodeId) -> Result<String, TreeError> {
        let node = self.nodes.get(&id).ok_or(TreeError::NotFound(id))?;
        match &node.body {
            NodeBody::File { handler, .. } => Ok(handler.read()),
            _ => Err(TreeError::NotAFile(node.name.clone())),
        }
    }

    /// Writes an attribute file through its handler
    ///
    /// Parse failures leave the underlying value unchanged.
    pub fn write_file(&mut self, id: NodeId, input: &str) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(&id).ok_or(TreeError::NotFound(id))?;
        match &mut node.body {
            NodeBody::File { mode, handler } => {
                if *mode == FileMode::ReadOnly {
                    return Err(TreeError::Attr(AttrError::ReadOnly));
                }
                handler.write(input)?;
                Ok(())
            }
            _ => Err(TreeError::NotAFile(node.name.clone())),
        }
    }

    /// Total number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes at all
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn should_reject(&self, name: &str) -> bool {
        match &self.policy {
            CreateFailurePolicy::Never => false,
            CreateFailurePolicy::AfterCreates(n) => self.create_count >= *n,
            CreateFailurePolicy::OnNames(names) => names.iter().any(|n| n == name),
        }
    }

    fn insert_node(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        body: NodeBody,
    ) -> Result<NodeId, TreeError> {
        if !is_valid_name(name) {
            return Err(TreeError::InvalidName(name.to_string()));
        }
        if self.should_reject(name) {
            return Err(TreeError::Rejected(name.to_string()));
        }

        match parent {
            None => {
                if self.roots.contains_key(name) {
                    return Err(TreeError::AlreadyExists(name.to_string()));
                }
            }
            Some(parent_id) => {
                let parent_node = self
                    .nodes
                    .get(&parent_id)
                    .ok_or(TreeError::NotFound(parent_id))?;
                match &parent_node.body {
                    NodeBody::Directory { children } => {
                        if children.contains_key(name) {
                            return Err(TreeError::AlreadyExists(name.to_string()));
                        }
                    }
                    _ => return Err(TreeError::NotADirectory(parent_node.name.clone())),
                }
            }
        }

        let id = NodeId::new();
        self.nodes.insert(
            id,
            DebugNode {
                name: name.to_string(),
                parent,
                body,
            },
        );
        self.create_count += 1;

        match parent {
            None => {
                self.roots.insert(name.to_string(), id);
            }
            Some(parent_id) => {
                if let Some(DebugNode {
                    body: NodeBody::Directory { children },
                    ..
                }) = self.nodes.get_mut(&parent_id)
                {
                    children.insert(name.to_string(), id);
                }
            }
        }

        Ok(id)
    }
}

impl Default for DebugTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates a single entry name
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0')
}
