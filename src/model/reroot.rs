//! Rerooting by edge reversal.
//!
//! Rerooting never mutates its input: it works on a copy, reverses the edges
//! on the path between the old root and the new one, and returns the result
//! renumbered in pre-order. Node ids are therefore not stable across a reroot,
//! which is why the public entry point looks the target up by name.

use crate::model::node::NodeId;
use crate::model::tree::PhyloTree;
use tracing::{debug, warn};

/// Reroots `tree` at the node named `name`.
///
/// The node is located by breadth-first search; see
/// [`PhyloTree::find_by_name`].
///
/// # Returns
/// * `Some(tree)` - the rerooted tree (an unchanged copy if `name` already is the root)
/// * `None` - no node carries that name; the caller keeps its tree
///
/// # Example
/// ```
/// use phyloview::model::reroot::reroot;
/// use phyloview::newick::to_newick;
/// use phyloview::parse_newick_str;
///
/// let tree = parse_newick_str("(A:1,(B:2,C:3):4);").unwrap();
/// let rerooted = reroot(&tree, "B").unwrap();
/// assert_eq!(to_newick(&rerooted), "((C:3,(A:1):4):2)B;");
/// assert!(reroot(&tree, "Moa").is_none());
/// ```
pub fn reroot(tree: &PhyloTree, name: &str) -> Option<PhyloTree> {
    match tree.find_by_name(name) {
        Some(target) => Some(reroot_at(tree, target)),
        None => {
            warn!(requested = %name, "reroot target not found, keeping current root");
            None
        }
    }
}

/// Reroots `tree` at node `target`.
///
/// Walks the captured ancestor path of `target` and reverses each edge on it:
/// the old parent is appended as last child of the node below it, taking the
/// branch length of the reversed edge along. Subtrees off the path keep their
/// shape and child order. The old root stays in the tree, possibly as a node
/// with a single child.
///
/// # Panics
/// Panics if `target` is out of bounds.
pub fn reroot_at(tree: &PhyloTree, target: NodeId) -> PhyloTree {
    if target == tree.root_id() {
        return tree.clone();
    }

    // [target, parent, grandparent, ..., root], captured before any edit
    let path = tree.ancestor_path(target);
    let lengths: Vec<_> = path.iter().map(|&id| tree[id].branch_length()).collect();

    let mut rerooted = tree.clone();
    for &id in &path[..path.len() - 1] {
        rerooted.detach(id);
    }

    for (i, pair) in path.windows(2).enumerate() {
        let (lower, upper) = (pair[0], pair[1]);
        rerooted.attach(lower, upper);
        rerooted.set_branch_length(upper, lengths[i]);
    }
    rerooted.set_branch_length(target, None);
    rerooted.set_root(target);

    debug!(
        new_root = tree[target].name(),
        reversed_edges = path.len() - 1,
        "rerooted tree"
    );

    rerooted.renumbered()
}
