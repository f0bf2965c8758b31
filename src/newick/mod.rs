//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick strings into a
//! [PhyloTree], and [to_newick] to write one back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string
//! * [`parse_file`] - reads a file holding a single tree
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= node ';'`
//! * `node ::= leaf | internal`
//! * `internal ::= '(' node (',' node)* ')' [label]`
//! * `leaf ::= [label]`
//! * `label ::= name | ':' length | name ':' length`
//!
//! Furthermore:
//! * Whitespace carries no meaning and is stripped everywhere,
//!   including inside names (`Homo sapiens` reads as `Homosapiens`)
//! * Nodes may have any number of children
//! * Names and lengths are optional; a missing length counts as `0` for layout
//! * NHX-style `[&...]` annotations are not supported

pub(crate) mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{to_newick, write_newick_file};

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string using default (lenient) settings.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [PhyloTree] - Tree parsed from the string
/// * [ParsingError] - If the string does not describe a tree
///
/// # Example
/// ```
/// use phyloview::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    NewickParser::new().parse_str(newick.as_ref())
}

/// Reads a file containing a single Newick string and parses it using default settings.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [PhyloTree] - Tree parsed from the file
/// * [ParsingError] - If reading fails or the string does not describe a tree
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    let newick = std::fs::read_to_string(path)?;
    parse_str(newick)
}
