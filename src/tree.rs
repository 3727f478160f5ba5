//! Arena-backed dependency tree
//!
//! Nodes live in a single `Vec` owned by [`DependencyTree`] and refer to each
//! other through [`NodeId`] indices. Children are owned by the arena, the
//! parent link is only used for upward queries.

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};

/// Index of a node inside its [`DependencyTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single package in the dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Package name, possibly scoped (`@company/package1`)
    pub name: String,
    /// Exact version; empty for the audited project itself
    pub version: String,
    /// License as declared by the package
    pub license: String,
    /// License after normalization (set by the annotator)
    pub license_normalized: Option<String>,
    /// Normalized license is not on the whitelist (set by the annotator)
    pub license_problem: bool,
    /// This node or a descendant has a license problem (set by the annotator)
    pub subtree_problem: bool,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(name: String, version: String, license: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            version,
            license,
            license_normalized: None,
            license_problem: false,
            subtree_problem: false,
            children: Vec::new(),
            parent,
        }
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Dependency tree rooted at the audited project.
///
/// The root is always `NodeId` 0. Nodes are only ever appended under an
/// existing parent, so the structure cannot contain cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    nodes: Vec<Node>,
}

impl DependencyTree {
    /// Create a tree holding only the root node
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        Self {
            nodes: vec![Node::new(name.into(), version.into(), license.into(), None)],
        }
    }

    /// Append a child under `parent`, keeping the parent's child order
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        version: impl Into<String>,
        license: impl Into<String>,
    ) -> Result<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Err(AuditError::InvalidNode(parent.0));
        }

        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(name.into(), version.into(), license.into(), Some(parent)));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Look up a node by id.
    ///
    /// Ids handed out by this tree are always valid since nodes are never removed.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Look up a node by an id that may come from elsewhere
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    /// Total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root, so this is never true
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk over every node below `id` (excluding `id` itself)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Pre-order walk over the whole tree, starting with the root
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        let root = self.root_id();
        std::iter::once(root)
            .chain(self.descendants(root))
            .map(move |id| (id, self.node(id)))
    }

    /// Ancestors of `id` from its parent up to the root
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            path.push(parent);
            current = self.parent(parent);
        }
        path
    }
}

/// Iterator returned by [`DependencyTree::descendants`]
pub struct Descendants<'a> {
    tree: &'a DependencyTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
