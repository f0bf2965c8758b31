//! Low-level parsing infrastructure.
//!
//! This module provides the [Tokenizer](tokenizer::Tokenizer) used by the
//! Newick parser together with [ParsingError] for reporting malformed input.

pub mod parsing_error;
pub mod tokenizer;

pub use parsing_error::{ParsingError, ParsingErrorKind};
