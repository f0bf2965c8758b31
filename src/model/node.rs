//! Node type for phylogenetic tree representation.

use serde::Serialize;
use std::ops::Deref;

/// Index of a node in a tree (arena). Assigned in Newick token order.
pub type NodeId = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node (vertex) in a phylogenetic tree.
///
/// Nodes live in the arena of a [PhyloTree](crate::model::PhyloTree) and
/// refer to each other only through [NodeId]s. The owning direction is always
/// parent → children; `parent` is a plain back-reference.
///
/// # Invariants
/// - `id` is the position of this node in the arena
/// - `parent` is `None` only for the root
/// - `children` order is the order in the source and drives layout ordering
/// - a node is a leaf iff it has no children
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct Node {
    id: NodeId,
    name: String,
    branch_length: Option<BranchLength>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Creates a new unnamed node without parent, children or branch length.
    pub(crate) fn new(id: NodeId) -> Self {
        Node {
            id,
            name: String::new(),
            branch_length: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the index of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the name of this node; empty for unnamed nodes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this node carries a non-empty name.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns the branch length to the parent, if one was given.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the branch length to the parent, treating a missing length as `0`.
    pub fn length_or_zero(&self) -> f64 {
        self.branch_length.map_or(0.0, |bl| *bl)
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the ordered child indices.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Removes `child` from the children, keeping the order of the others.
    ///
    /// # Returns
    /// `true` if `child` was a child of this node.
    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(pos) => {
                self.children.remove(pos);
                true
            }
            None => false,
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative and finite.
///
/// Represents the evolutionary distance between a node and its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(
            length >= 0.0,
            "Branch length must be non-negative, got {}",
            length
        );
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl std::fmt::Display for BranchLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
