//! Ordinal and metric placement shared by all layout kinds.
//!
//! * Ordinal: where a node sits along the leaf axis. Leaves are ranked
//!   `0..n` in pre-order, an internal node sits halfway between its first
//!   and last child.
//! * Metric: how far a node sits from the root. Either the cumulative branch
//!   length ([LinkMode::Variable]) or the generation depth ([LinkMode::Constant]).

use crate::layout::config::LinkMode;
use crate::model::PhyloTree;
use tracing::debug;

/// Returns the ordinal rank of every node, indexed by [NodeId](crate::model::NodeId).
///
/// # Example
/// For `((A,B),C);` the leaves get `0, 1, 2`, the cherry `0.5` and the
/// root `(0.5 + 2) / 2 = 1.25`.
pub(crate) fn leaf_ranks(tree: &PhyloTree) -> Vec<f64> {
    let mut ranks = vec![0.0; tree.num_nodes()];
    let mut next_rank = 0.0;
    // post-order reaches leaves left to right and children before parents
    for node in tree.post_order_iter() {
        ranks[node.id()] = match (node.children().first(), node.children().last()) {
            (Some(&first), Some(&last)) => (ranks[first] + ranks[last]) / 2.0,
            _ => {
                let rank = next_rank;
                next_rank += 1.0;
                rank
            }
        };
    }
    ranks
}

/// Returns the drawn length of the edge into every node (`0` for the root).
///
/// In variable mode this is the branch length (missing counts as `0`); in
/// constant mode every edge has length `1`. Falls back to constant mode when
/// the tree has edges but none of them carries a positive length.
pub(crate) fn edge_lengths(tree: &PhyloTree, mode: LinkMode) -> Vec<f64> {
    let lengths: Vec<f64> = tree
        .nodes()
        .iter()
        .map(|n| match (n.is_root(), mode) {
            (true, _) => 0.0,
            (false, LinkMode::Variable) => n.length_or_zero(),
            (false, LinkMode::Constant) => 1.0,
        })
        .collect();

    if mode == LinkMode::Variable && tree.num_nodes() > 1 && lengths.iter().all(|&l| l == 0.0) {
        debug!("no positive branch lengths, falling back to constant links");
        return edge_lengths(tree, LinkMode::Constant);
    }
    lengths
}

/// Returns the unscaled metric value of every node, indexed by [NodeId](crate::model::NodeId).
pub(crate) fn metric_values(tree: &PhyloTree, mode: LinkMode) -> Vec<f64> {
    let constant = || tree.depths().into_iter().map(|d| d as f64).collect();
    match mode {
        LinkMode::Constant => constant(),
        LinkMode::Variable => {
            let distances = tree.root_distances();
            if tree.num_nodes() > 1 && distances.iter().all(|&d| d == 0.0) {
                debug!("all root distances are zero, falling back to constant links");
                constant()
            } else {
                distances
            }
        }
    }
}

/// Scales `values` linearly so that the largest one becomes `extent`.
/// All-zero input stays zero.
pub(crate) fn scale_to(values: &[f64], extent: f64) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    let factor = extent / max;
    values.iter().map(|v| v * factor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    #[test]
    fn test_leaf_ranks_cherry() {
        let tree = parse_str("((A,B),C);").unwrap();
        let ranks = leaf_ranks(&tree);
        // ids: 0 root, 1 cherry, 2 A, 3 B, 4 C
        assert_eq!(ranks, vec![1.25, 0.5, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_metric_values_fall_back_without_lengths() {
        let tree = parse_str("((A,B),C);").unwrap();
        assert_eq!(
            metric_values(&tree, LinkMode::Variable),
            metric_values(&tree, LinkMode::Constant)
        );
        assert_eq!(edge_lengths(&tree, LinkMode::Variable), vec![0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_scale_to() {
        assert_eq!(scale_to(&[0.0, 1.0, 2.0], 10.0), vec![0.0, 5.0, 10.0]);
        assert_eq!(scale_to(&[0.0], 10.0), vec![0.0]);
    }
}
