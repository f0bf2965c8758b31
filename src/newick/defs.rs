//! Constants and definitions for the Newick parser and writer.

/// Newick structural bytes: parentheses, comma, semicolon
pub(crate) const NEWICK_DELIMITERS: &[u8] = b"(),;";

/// Separator between name and branch length within a label token
pub(crate) const LENGTH_SEPARATOR: char = ':';

/// Returns `true` for bytes that end a label token.
#[inline]
pub(crate) fn is_delimiter(b: u8) -> bool {
    NEWICK_DELIMITERS.contains(&b)
}

/// Returns `true` for whitespace bytes, which carry no meaning in Newick.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
