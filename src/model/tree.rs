//! Provides the rooted tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [PhyloTree] - Main tree structure using the arena pattern
//! * [PreOrderIter], [PostOrderIter] - stack based traversals

use crate::model::node::{BranchLength, Node, NodeId};
use serde::Serialize;
use std::fmt;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeId]. Aim is
/// to avoid referencing troubles (parents and children pointing at each
/// other) as well as to provide efficient memory layout for traversals.
///
/// # Structure
/// - All nodes (root, internal, and leaves) are stored in the arena.
/// - The arena always contains at least the root.
/// - Nodes may have any number of children (not restricted to binary trees).
/// - Ids produced by the parser follow Newick token order, which is pre-order.
///
/// # Construction
/// Start with [`PhyloTree::new()`], which holds only an unnamed root, and
/// grow the tree top-down with [`add_child`](Self::add_child).
/// Test validity with [`PhyloTree::is_valid()`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhyloTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root: NodeId,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new tree consisting of a single unnamed root with id `0`.
    pub fn new() -> Self {
        PhyloTree {
            nodes: vec![Node::new(0)],
            root: 0,
        }
    }

    /// Adds a new unnamed child as last child of `parent`,
    /// assigning the next free index, which gets returned.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        let id = self.nodes.len();
        let mut node = Node::new(id);
        node.set_parent(Some(parent));
        self.nodes.push(node);
        self.nodes[parent].push_child(id);
        id
    }

    /// Sets the name of the given node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.nodes[id].set_name(name.into());
    }

    /// Sets (or clears) the branch length of the given node.
    pub fn set_branch_length(&mut self, id: NodeId, branch_length: Option<BranchLength>) {
        self.nodes[id].set_branch_length(branch_length);
    }

    /// Returns a reference to the root node.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Returns the index of the root.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns a reference to the node at the given index, or `None` if out of bounds.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns whether `id` refers to a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    /// Returns all nodes in arena (id) order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the number of non-leaf nodes in this tree (root included).
    pub fn num_internal(&self) -> usize {
        self.nodes.len() - self.num_leaves()
    }

    /// Returns the sum of all branch lengths in the tree (missing lengths count as `0`).
    pub fn total_branch_length(&self) -> f64 {
        self.nodes.iter().map(Node::length_or_zero).sum()
    }

    /// Checks if all non-root nodes have branch lengths set.
    pub fn nodes_have_branch_lengths(&self) -> bool {
        self.nodes
            .iter()
            .all(|n| n.is_root() || n.branch_length().is_some())
    }

    /// Returns a copy of this tree with ids reassigned in pre-order, i.e. the
    /// ids a fresh parse of this tree's Newick string would produce.
    pub fn renumbered(&self) -> PhyloTree {
        let order: Vec<NodeId> = self.pre_order_iter().map(Node::id).collect();
        let mut new_id = vec![0; self.nodes.len()];
        for (new, &old) in order.iter().enumerate() {
            new_id[old] = new;
        }

        let nodes = order
            .iter()
            .enumerate()
            .map(|(new, &old)| {
                let source = &self.nodes[old];
                let mut node = Node::new(new);
                node.set_name(source.name().to_string());
                node.set_branch_length(source.branch_length());
                node.set_parent(source.parent().map(|p| new_id[p]));
                for &child in source.children() {
                    node.push_child(new_id[child]);
                }
                node
            })
            .collect();

        PhyloTree { nodes, root: 0 }
    }
}

impl Default for PhyloTree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Structural edits (crate)
// ============================================================================
impl PhyloTree {
    /// Removes `child` from its parent's children and clears its parent.
    ///
    /// # Returns
    /// The former parent, or `None` if `child` was the root.
    pub(crate) fn detach(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.nodes[child].parent()?;
        self.nodes[parent].remove_child(child);
        self.nodes[child].set_parent(None);
        Some(parent)
    }

    /// Appends the parentless node `child` as last child of `parent`.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child].parent().is_none());
        self.nodes[parent].push_child(child);
        self.nodes[child].set_parent(Some(parent));
    }

    /// Declares the parentless node `id` the root.
    pub(crate) fn set_root(&mut self, id: NodeId) {
        debug_assert!(self.nodes[id].parent().is_none());
        self.root = id;
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl PhyloTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is in bounds and the root has no parent
    /// - All node ids match their position in the arena
    /// - Every non-root node has an in-bounds parent listing it exactly once
    /// - Every child points back to its parent
    /// - All nodes are reachable from the root (so there are no cycles)
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let n = self.nodes.len();
        if self.root >= n || self.nodes[self.root].parent().is_some() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.id() != index {
                return false;
            }

            for &child in node.children() {
                if child >= n || self.nodes[child].parent() != Some(index) {
                    return false;
                }
            }

            match node.parent() {
                None if index != self.root => return false,
                None => {}
                Some(parent) => {
                    if parent >= n {
                        return false;
                    }
                    let listed = self.nodes[parent]
                        .children()
                        .iter()
                        .filter(|&&c| c == index)
                        .count();
                    if listed != 1 {
                        return false;
                    }
                }
            }
        }

        // With consistent parent links, reaching every node from the root
        // rules out cycles.
        let mut seen = vec![false; n];
        let mut stack = vec![self.root];
        let mut reached = 0;
        while let Some(id) = stack.pop() {
            if seen[id] {
                return false;
            }
            seen[id] = true;
            reached += 1;
            stack.extend_from_slice(self.nodes[id].children());
        }

        reached == n
    }
}

impl std::ops::Index<NodeId> for PhyloTree {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}

// ============================================================================
// Printing
// ============================================================================
/// Renders an indented outline of the tree.
///
/// # Example Output
/// ```text
/// Tree with 3 leaves (5 nodes total):
/// [0] (root)
///   ├─ [1] Leaf "A" (branch: 1.000)
///   └─ [2] Internal (branch: 4.000)
///     ├─ [3] Leaf "B" (branch: 2.000)
///     └─ [4] Leaf "C" (branch: 3.000)
/// ```
impl fmt::Display for PhyloTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Tree with {} leaves ({} nodes total):",
            self.num_leaves(),
            self.num_nodes()
        )?;

        // (id, prefix for children, is_last)
        let mut stack: Vec<(NodeId, String, bool)> = vec![(self.root, String::new(), true)];
        while let Some((id, prefix, is_last)) = stack.pop() {
            let node = &self.nodes[id];
            if id == self.root {
                write!(f, "[{}] (root)", id)?;
                if node.has_name() {
                    write!(f, " \"{}\"", node.name())?;
                }
                writeln!(f)?;
            } else {
                let connector = if is_last { "└─ " } else { "├─ " };
                let kind = if node.is_leaf() { "Leaf" } else { "Internal" };
                write!(f, "{}{}[{}] {}", prefix, connector, id, kind)?;
                if node.has_name() {
                    write!(f, " \"{}\"", node.name())?;
                }
                match node.branch_length() {
                    Some(bl) => writeln!(f, " (branch: {:.3})", *bl)?,
                    None => writeln!(f, " (no branch)")?,
                }
            }

            let child_prefix = if id == self.root {
                "  ".to_string()
            } else {
                format!("{}{}", prefix, if is_last { "   " } else { "│  " })
            };
            let children = node.children();
            for (i, &child) in children.iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), i + 1 == children.len()));
            }
        }

        Ok(())
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// This is useful for aggregating data from leaves upward, e.g. leaf counts.
    ///
    /// # Example
    /// ```
    /// use phyloview::parse_newick_str;
    ///
    /// let tree = parse_newick_str("(A,B);").unwrap();
    /// let ids: Vec<_> = tree.post_order_iter().map(|n| n.id()).collect();
    /// assert_eq!(ids, vec![1, 2, 0]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.root)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Children are visited in their stored order.
    ///
    /// # Example
    /// ```
    /// use phyloview::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((A,B),C);").unwrap();
    /// let names: Vec<_> = tree.pre_order_iter().map(|n| n.name()).collect();
    /// assert_eq!(names, vec!["", "", "A", "B", "C"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root)
    }

    /// Returns a pre-order iterator over the subtree rooted at `id` (`id` included).
    pub fn subtree_iter(&self, id: NodeId) -> PreOrderIter<'_> {
        PreOrderIter::new(self, id)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PostOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<(NodeId, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a PhyloTree, start: NodeId) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.is_leaf() {
                return Some(node);
            }

            self.stack.push((index, true));
            // Push children in reverse, so first child is processed first
            for &child in node.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree, start: NodeId) -> Self {
        PreOrderIter {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];

        self.stack.extend(node.children().iter().rev());

        Some(node)
    }
}
