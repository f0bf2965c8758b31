//! Phyloview is an interactive phylogenetic tree engine.
//!
//! It turns a Newick string into a rooted tree and keeps everything needed to
//! draw and explore it:
//! - Newick: Parse single Newick strings into a [PhyloTree] and write them
//!   back (see [crate::newick]).
//! - Tree model: Arena of [Node](model::Node)s referenced by
//!   [NodeId](model::NodeId), nodes of any degree with optional names and
//!   branch lengths. Clade queries (leaf counts, descendants, ancestor paths,
//!   name lookup) and rerooting by edge reversal (see [crate::model]).
//! - Layouts: Radial dendrogram, rectangular cladogram and unrooted
//!   equal-angle plot, each with proportional or per-generation branch
//!   lengths (see [crate::layout]).
//! - Interaction: Collapsing clades ([crate::collapse]), highlighting clades
//!   and root paths ([crate::highlight]), searching, rerooting and switching
//!   layouts through a single [TreeView](view::TreeView) ([crate::view]).
//!
//! Limitations:
//! - One tree per input string
//! - NHX-style `[&...]` annotations are not supported
//! - Drawing itself is left to the host; [view::RenderModel] is a
//!   serializable snapshot of what to draw
//!
//! # Usage patterns
//! 1. Parse with the quick API ([parse_newick_str], [parse_newick_file]) or
//!    a configured [NewickParser](newick::NewickParser), and compute a
//!    [Layout](layout::Layout) directly.
//! 2. Wrap the tree in a [TreeView](view::TreeView) and drive it with
//!    [Command](view::Command)s.
//!
//! ## Example Quick API
//! ```
//! use phyloview::layout::{Layout, LayoutConfig};
//! use phyloview::parse_newick_str;
//!
//! let tree = parse_newick_str("((A:0.1,B:0.2):0.3,C:0.4);").unwrap();
//! assert_eq!(tree.num_leaves(), 3);
//!
//! let layout = Layout::compute(&tree, &LayoutConfig::default());
//! assert_eq!(layout.extensions().len(), 3);
//! ```
//!
//! ## Example Interactive View
//! ```
//! use phyloview::view::{Command, TreeView, ViewConfig};
//!
//! let mut view = TreeView::from_newick("((A:1,B:1)AB:1,C:2);", ViewConfig::default())?;
//! view.layout();
//!
//! view.enqueue(Command::ToggleCollapse { node: 1 });
//! view.enqueue(Command::Search { name: "A".to_string() });
//! let outcomes = view.flush();
//! assert_eq!(outcomes.len(), 2);
//!
//! // A is hidden inside the collapsed clade, so the search misses
//! let model = view.render_model()?;
//! assert!(model.nodes[2].hidden);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod collapse;
pub mod highlight;
pub mod layout;
pub mod model;
pub mod newick;
pub mod parser;
pub mod view;

use crate::model::PhyloTree;
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [PhyloTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file containing a single Newick string using default settings,
/// returning a [PhyloTree].
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    newick::parse_file(path)
}
