//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Node]s referenced by [NodeId]. Nodes may have any number of children.
//!
//! # Queries and transforms
//! - [clade] - leaf counts, descendants, ancestor paths, name lookup
//! - [reroot] - edge-reversal rerooting, returning a new tree
//!
//! Layout, collapse and highlight state are kept in side tables indexed by
//! [NodeId] (see [crate::layout], [crate::collapse], [crate::highlight]), so
//! the tree itself only ever holds topology, names and branch lengths.

pub mod clade;
pub mod node;
pub mod reroot;
pub mod tree;

pub use node::{BranchLength, Node, NodeId};
pub use tree::PhyloTree;
