//! Clade collapse state.
//!
//! [CollapseState] keeps two flags per node in side tables indexed by
//! [NodeId]:
//! * `collapsed` - the user folded this clade away
//! * `hidden` - some proper ancestor is collapsed, so the node, the link into
//!   it, its extension and its label are not drawn
//!
//! A collapsed node itself stays visible and acts as the clade's stand-in.
//! Collapsing never alters the tree.
//!
//! # Example
//! ```
//! use phyloview::collapse::CollapseState;
//! use phyloview::parse_newick_str;
//!
//! let tree = parse_newick_str("((Kea,Kaka)Nestor,Kakapo);").unwrap();
//! let mut collapse = CollapseState::new(&tree);
//!
//! assert!(collapse.toggle(&tree, 1));
//! assert!(collapse.is_hidden(2) && collapse.is_hidden(3));
//! assert!(!collapse.is_hidden(1));
//!
//! collapse.toggle(&tree, 1);
//! assert!(collapse.hidden_nodes().is_empty());
//! ```

use crate::model::{NodeId, PhyloTree};
use tracing::debug;

/// Per-node collapsed and hidden flags for one tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollapseState {
    collapsed: Vec<bool>,
    hidden: Vec<bool>,
}

impl CollapseState {
    /// Creates a state for `tree` with every node expanded.
    pub fn new(tree: &PhyloTree) -> Self {
        CollapseState {
            collapsed: vec![false; tree.num_nodes()],
            hidden: vec![false; tree.num_nodes()],
        }
    }

    /// Collapses or expands the clade rooted at `id`.
    ///
    /// Hidden flags are recomputed for the clade only: a descendant is hidden
    /// iff some node between it and `id` (inclusive) is collapsed, or `id`
    /// itself is hidden. Collapses nested inside the clade therefore stay in
    /// force when the outer clade is expanded again.
    ///
    /// # Returns
    /// The new collapsed flag of `id`. Leaves cannot be collapsed; for them
    /// this is a no-op returning `false`.
    ///
    /// # Panics
    /// Panics if `id` is not a node of `tree`, or the state was created for a
    /// tree of a different size.
    pub fn toggle(&mut self, tree: &PhyloTree, id: NodeId) -> bool {
        assert_eq!(self.collapsed.len(), tree.num_nodes(), "collapse state of a different tree");
        if tree[id].is_leaf() {
            debug!(node = id, "ignoring collapse toggle on leaf");
            return false;
        }

        self.collapsed[id] = !self.collapsed[id];
        // pre-order guarantees a parent's hidden flag is final before its children
        for node in tree.subtree_iter(id).skip(1) {
            let child = node.id();
            if let Some(parent) = node.parent() {
                self.hidden[child] = self.hidden[parent] || self.collapsed[parent];
            }
        }
        debug!(node = id, collapsed = self.collapsed[id], "clade toggled");
        self.collapsed[id]
    }

    /// Returns `true` if the user collapsed the clade at `id`.
    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.collapsed.get(id).copied().unwrap_or(false)
    }

    /// Returns `true` if `id` is inside a collapsed clade and thus not drawn.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.hidden.get(id).copied().unwrap_or(false)
    }

    /// Returns `true` if the link into `id` is not drawn; links share the
    /// hidden flag of their child.
    pub fn is_link_hidden(&self, id: NodeId) -> bool {
        self.is_hidden(id)
    }

    /// Returns the ids of all hidden nodes in ascending order.
    pub fn hidden_nodes(&self) -> Vec<NodeId> {
        self.hidden
            .iter()
            .enumerate()
            .filter_map(|(id, &hidden)| hidden.then_some(id))
            .collect()
    }

    /// Returns the ids of all collapsed nodes in ascending order.
    pub fn collapsed_nodes(&self) -> Vec<NodeId> {
        self.collapsed
            .iter()
            .enumerate()
            .filter_map(|(id, &collapsed)| collapsed.then_some(id))
            .collect()
    }
}
