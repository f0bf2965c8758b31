//! Newick serialization of a [PhyloTree].

use crate::model::PhyloTree;
use crate::model::node::{Node, NodeId};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Each node is written as `name[:branch_length]`; internal nodes put their
/// name and length after the closing parenthesis. Parsing the result gives
/// back a tree with the same ids, names, lengths and shape.
///
/// # Example
/// ```
/// use phyloview::newick::to_newick;
/// use phyloview::parse_newick_str;
///
/// let tree = parse_newick_str("((Little_Spotted_Kiwi:1.0,Great_Spotted_Kiwi:1.0):0.5,Okarito_Kiwi:1.5);").unwrap();
/// assert_eq!(
///     to_newick(&tree),
///     "((Little_Spotted_Kiwi:1,Great_Spotted_Kiwi:1):0.5,Okarito_Kiwi:1.5);"
/// );
/// ```
pub fn to_newick(tree: &PhyloTree) -> String {
    // Pending output while walking the tree with an explicit stack
    enum Step {
        Open(NodeId),
        Close(NodeId),
        Separator,
    }

    // Helper for adding name and branch length
    fn build_newick_label(newick: &mut String, node: &Node) {
        newick.push_str(node.name());
        if let Some(branch_length) = node.branch_length() {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    let mut stack = vec![Step::Open(tree.root_id())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(index) => {
                let node = &tree[index];
                if node.is_leaf() {
                    build_newick_label(&mut newick, node);
                    continue;
                }
                newick.push('(');
                stack.push(Step::Close(index));
                // Push in reverse, so first child is written first
                for (i, &child) in node.children().iter().enumerate().rev() {
                    stack.push(Step::Open(child));
                    if i > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Close(index) => {
                newick.push(')');
                build_newick_label(&mut newick, &tree[index]);
            }
            Step::Separator => newick.push(','),
        }
    }
    newick.push(';');

    newick
}

/// Writes the given tree to a file in Newick format, followed by a newline.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick_file(file: File, tree: &PhyloTree) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(to_newick(tree).as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Estimates the length of a Newick string for a given tree, to pre-allocate
/// string capacity.
fn estimate_newick_len(tree: &PhyloTree) -> usize {
    // Each internal node: "()" plus one "," per extra child ~= 3 chars
    const INTERNAL_NODE_CHARS: usize = 3;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let structure_capacity = tree.num_internal() * INTERNAL_NODE_CHARS;
    let label_capacity: usize = tree.nodes().iter().map(|n| n.name().len()).sum();
    let branch_capacity = tree
        .nodes()
        .iter()
        .filter(|n| n.branch_length().is_some())
        .count()
        * BRANCH_LENGTH_CHARS;

    structure_capacity + label_capacity + branch_capacity + BUFFER_CHARS
}
