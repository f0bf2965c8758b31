//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [ParsingErrorKind] for representing
//! and reporting errors that occur while parsing a tree description.

use crate::parser::tokenizer::Tokenizer;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR KIND
// =#========================================================================#=
/// Error kinds that can occur while parsing a Newick string.
#[derive(PartialEq, Debug, Clone, Error)]
pub enum ParsingErrorKind {
    /// Reading the input failed.
    #[error("IO error - {0}")]
    Io(String),
    /// Parentheses or separators do not describe a tree,
    /// e.g. `,` or `)` at root level or unclosed `(`.
    #[error("Malformed tree structure: {0}")]
    Structural(String),
    /// Label token with more than one `:` (strict mode only).
    #[error("Ambiguous label '{0}'")]
    AmbiguousLabel(String),
    /// Branch length that is not a finite, non-negative number (strict mode only).
    #[error("Invalid branch length '{0}'")]
    InvalidBranchLength(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and surrounding bytes).
#[derive(Debug, Clone, Error)]
#[error("{kind} at position {position}{}", format_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorKind,
    position: usize,
    context: String,
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error kind and tokenizer state
    pub(crate) fn from_tokenizer(kind: ParsingErrorKind, tokenizer: &Tokenizer<'_>) -> Self {
        Self {
            kind,
            position: tokenizer.position(),
            context: tokenizer.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for [ParsingErrorKind::Structural]
    pub(crate) fn structural(tokenizer: &Tokenizer<'_>, msg: String) -> Self {
        Self::from_tokenizer(ParsingErrorKind::Structural(msg), tokenizer)
    }

    /// Convenience constructor for [ParsingErrorKind::AmbiguousLabel]
    pub(crate) fn ambiguous_label(tokenizer: &Tokenizer<'_>, label: &str) -> Self {
        Self::from_tokenizer(ParsingErrorKind::AmbiguousLabel(label.to_string()), tokenizer)
    }

    /// Convenience constructor for [ParsingErrorKind::InvalidBranchLength]
    pub(crate) fn invalid_branch_length(tokenizer: &Tokenizer<'_>, length: &str) -> Self {
        Self::from_tokenizer(
            ParsingErrorKind::InvalidBranchLength(length.to_string()),
            tokenizer,
        )
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` if the input did not describe a tree.
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, ParsingErrorKind::Structural(_))
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorKind::Io(err.to_string()),
            position: 0, // No position for IO errors
            context: String::new(),
        }
    }
}
