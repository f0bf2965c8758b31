//! Clade queries on a [PhyloTree].
//!
//! Pure functions over the tree: leaf counts, descendant enumeration,
//! ancestor paths, name lookup, and the per-node depth values the layouts
//! are built from.

use crate::model::node::{Node, NodeId};
use crate::model::tree::PhyloTree;
use std::collections::VecDeque;

impl PhyloTree {
    /// Returns the number of leaves in the clade rooted at `id`
    /// (`1` if `id` is itself a leaf).
    pub fn count_leaves(&self, id: NodeId) -> usize {
        self.subtree_iter(id).filter(|n| n.is_leaf()).count()
    }

    /// Returns the leaf count of every clade at once, indexed by [NodeId].
    ///
    /// Computed bottom-up in a single post-order pass, which is what a layout
    /// pass needs instead of calling [`count_leaves`](Self::count_leaves) per node.
    pub fn leaf_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_nodes()];
        for node in self.post_order_iter() {
            counts[node.id()] = if node.is_leaf() {
                1
            } else {
                node.children().iter().map(|&c| counts[c]).sum()
            };
        }
        counts
    }

    /// Enumerates the proper descendants of `id` depth-first in pre-order.
    ///
    /// # Arguments
    /// * `id` - Root of the clade; not part of the result
    /// * `include_internal` - Whether to report descendants that have children
    /// * `include_leaves` - Whether to report descendant leaves
    ///
    /// # Example
    /// ```
    /// use phyloview::parse_newick_str;
    ///
    /// let tree = parse_newick_str("(A,(B,C)D)R;").unwrap();
    /// let names = |ids: Vec<usize>| ids.into_iter().map(|i| tree[i].name().to_string()).collect::<Vec<_>>();
    /// assert_eq!(names(tree.descendants(0, true, true)), ["A", "D", "B", "C"]);
    /// assert_eq!(names(tree.descendants(0, false, true)), ["A", "B", "C"]);
    /// assert_eq!(names(tree.descendants(0, true, false)), ["D"]);
    /// ```
    pub fn descendants(
        &self,
        id: NodeId,
        include_internal: bool,
        include_leaves: bool,
    ) -> Vec<NodeId> {
        self.subtree_iter(id)
            .skip(1)
            .filter(|n| if n.is_leaf() { include_leaves } else { include_internal })
            .map(Node::id)
            .collect()
    }

    /// Returns the path from `id` up to the root, both inclusive, in that order.
    pub fn ancestor_path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self[current].parent() {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Returns `true` if `ancestor` lies on the path from `id` to the root
    /// (a node counts as its own ancestor).
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self[c].parent();
        }
        false
    }

    /// Finds a node by exact name using breadth-first search from the root.
    ///
    /// # Returns
    /// The first match in breadth-first order, or `None`.
    /// Empty names never match.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        if name.is_empty() {
            return None;
        }

        let mut queue = VecDeque::from([self.root_id()]);
        while let Some(id) = queue.pop_front() {
            let node = &self[id];
            if node.name() == name {
                return Some(id);
            }
            queue.extend(node.children().iter().copied());
        }
        None
    }

    /// Returns the generation depth of every node (root is `0`), indexed by [NodeId].
    pub fn depths(&self) -> Vec<usize> {
        let mut depths = vec![0; self.num_nodes()];
        for node in self.pre_order_iter() {
            if let Some(parent) = node.parent() {
                depths[node.id()] = depths[parent] + 1;
            }
        }
        depths
    }

    /// Returns the cumulative branch length from the root to every node,
    /// indexed by [NodeId]. Missing lengths count as `0`; the root's own
    /// branch length is ignored.
    pub fn root_distances(&self) -> Vec<f64> {
        let mut distances = vec![0.0; self.num_nodes()];
        for node in self.pre_order_iter() {
            if let Some(parent) = node.parent() {
                distances[node.id()] = distances[parent] + node.length_or_zero();
            }
        }
        distances
    }

    /// Returns the ids of all leaves in pre-order, i.e. left-to-right order.
    pub fn leaves_in_order(&self) -> Vec<NodeId> {
        self.pre_order_iter()
            .filter(|n| n.is_leaf())
            .map(Node::id)
            .collect()
    }
}
