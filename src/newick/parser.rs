//! Struct and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, a cursor-based parser that
//! turns a single Newick string into a [PhyloTree].

use crate::model::{BranchLength, NodeId, PhyloTree};
use crate::newick::defs::LENGTH_SEPARATOR;
use crate::parser::parsing_error::ParsingError;
use crate::parser::tokenizer::{Token, Tokenizer};
use tracing::{debug, trace, warn};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for single Newick strings of arbitrary degree.
///
/// # Construction
/// * [`new()`](Self::new) - lenient defaults
///
/// # Configuration
/// * [`with_strict_labels()`](Self::with_strict_labels)
///     - Makes ambiguous label tokens (more than one `:`) and invalid branch
///       lengths fatal. By default they are logged and ignored, so a single
///       malformed label does not block an otherwise valid tree.
///
/// # Parsing
/// The parser keeps a cursor node, starting at the root:
/// * `(` adds a child to the cursor and descends into it
/// * `,` ascends one level, adds a sibling and descends into it
/// * `)` ascends one level
/// * a label token sets name and/or branch length of the cursor
/// * `;` ends the tree
///
/// Ids are handed out as nodes are created, i.e. in token order, with the
/// root as `0`.
///
/// # Example
/// ```
/// use phyloview::newick::NewickParser;
///
/// let tree = NewickParser::new()
///     .parse_str("((Kea:1.0,Kaka:1.0):0.5,Kakapo:1.5);")
///     .unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree[2].name(), "Kea");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewickParser {
    strict_labels: bool,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with lenient label handling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the parser to reject ambiguous labels and invalid branch lengths.
    pub fn with_strict_labels(mut self) -> Self {
        self.strict_labels = true;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick string.
    ///
    /// # Arguments
    /// * `newick` - The tree description; whitespace anywhere is ignored
    ///
    /// # Returns
    /// * `Ok(PhyloTree)` - The parsed tree
    /// * `Err(ParsingError)` - If `,` or `)` appear with no parent to ascend to,
    ///   or the tree ends with unclosed `(`. In strict mode also for
    ///   malformed labels.
    pub fn parse_str(&self, newick: &str) -> Result<PhyloTree, ParsingError> {
        let mut tokenizer = Tokenizer::new(newick);
        let mut tree = PhyloTree::new();
        let mut cursor = tree.root_id();
        let mut terminated = false;

        while let Some(token) = tokenizer.next_token() {
            trace!(?token, cursor, "newick token");
            match token {
                Token::Open => {
                    cursor = tree.add_child(cursor);
                }
                Token::Comma => {
                    let parent = tree[cursor].parent().ok_or_else(|| {
                        ParsingError::structural(&tokenizer, "',' outside of any '('".to_string())
                    })?;
                    cursor = tree.add_child(parent);
                }
                Token::Close => {
                    cursor = tree[cursor].parent().ok_or_else(|| {
                        ParsingError::structural(
                            &tokenizer,
                            "')' without matching '('".to_string(),
                        )
                    })?;
                }
                Token::Semicolon => {
                    terminated = true;
                    break;
                }
                Token::Label(label) => {
                    self.apply_label(&mut tree, cursor, &label, &tokenizer)?;
                }
            }
        }

        if cursor != tree.root_id() {
            let depth = tree.ancestor_path(cursor).len() - 1;
            return Err(ParsingError::structural(
                &tokenizer,
                format!("Tree ended with {} unclosed '('", depth),
            ));
        }

        if !terminated {
            debug!("Newick string without terminating ';' accepted");
        } else if !tokenizer.is_eof() {
            warn!(
                position = tokenizer.position(),
                "ignoring text after terminating ';'"
            );
        }

        Ok(tree)
    }
}

// ============================================================================
// Labels
// ============================================================================
impl NewickParser {
    /// Applies a label token (`name`, `:length` or `name:length`) to `node`.
    fn apply_label(
        &self,
        tree: &mut PhyloTree,
        node: NodeId,
        label: &str,
        tokenizer: &Tokenizer<'_>,
    ) -> Result<(), ParsingError> {
        let Some((name, length)) = label.split_once(LENGTH_SEPARATOR) else {
            tree.set_name(node, label);
            return Ok(());
        };

        if length.contains(LENGTH_SEPARATOR) {
            if self.strict_labels {
                return Err(ParsingError::ambiguous_label(tokenizer, label));
            }
            warn!(label, node, "ambiguous label with more than one ':' ignored");
            return Ok(());
        }

        tree.set_name(node, name);
        let branch_length = self.parse_branch_length(length, node, tokenizer)?;
        tree.set_branch_length(node, branch_length);
        Ok(())
    }

    /// Parses a branch length; supports scientific notation (e.g., `1.5e-10`).
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` for finite, non-negative numbers
    /// - `Ok(None)` for anything else in lenient mode (logged)
    /// - [ParsingError] for anything else in strict mode
    fn parse_branch_length(
        &self,
        length: &str,
        node: NodeId,
        tokenizer: &Tokenizer<'_>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        let parsed = length.parse::<f64>().ok().and_then(BranchLength::try_new);
        match parsed {
            Some(bl) => Ok(Some(bl)),
            None if self.strict_labels => {
                Err(ParsingError::invalid_branch_length(tokenizer, length))
            }
            None => {
                warn!(length, node, "invalid branch length ignored");
                Ok(None)
            }
        }
    }
}
