//! Low-level tokenizer for Newick text.
//!
//! This module provides [Tokenizer], which splits a tree description into the
//! four syntactic characters `(`, `)`, `,`, `;` and label tokens. All
//! whitespace is dropped, since the format has no semantic whitespace.

use crate::newick::defs::{is_delimiter, is_whitespace};

// =#========================================================================#=
// TOKEN
// =#========================================================================#=
/// A single token of a Newick string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `(` - descend into a new child
    Open,
    /// `)` - ascend to the parent
    Close,
    /// `,` - ascend and descend into a new sibling
    Comma,
    /// `;` - end of tree
    Semicolon,
    /// Anything else, e.g. `name`, `:0.5` or `name:0.5`
    Label(String),
}

// =#========================================================================#=
// TOKENIZER
// =#========================================================================#=
/// A byte-by-byte tokenizer over ASCII Newick text.
///
/// Works directly on the bytes of the input. Multi-byte UTF-8 sequences can
/// only appear inside labels (they never contain delimiter bytes) and are
/// carried through unchanged.
///
/// # Example
/// ```
/// use phyloview::parser::tokenizer::{Token, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new("(Kea, Kaka);");
/// assert_eq!(tokenizer.next_token(), Some(Token::Open));
/// assert_eq!(tokenizer.next_token(), Some(Token::Label("Kea".to_string())));
/// assert_eq!(tokenizer.next_token(), Some(Token::Comma));
/// ```
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer over the given string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips (consumes) all consecutive whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Returns the current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check if at end of data, ignoring trailing whitespace.
    pub fn is_eof(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.input.len()
    }

    /// Returns the next token, or `None` at end of input.
    ///
    /// Whitespace between and inside tokens is dropped, so `Homo sapiens`
    /// yields the single label `Homosapiens`.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let byte = self.peek()?;

        let token = match byte {
            b'(' => Token::Open,
            b')' => Token::Close,
            b',' => Token::Comma,
            b';' => Token::Semicolon,
            _ => return Some(Token::Label(self.read_label())),
        };
        self.pos += 1;
        Some(token)
    }

    /// Reads bytes up to the next delimiter, dropping whitespace.
    fn read_label(&mut self) -> String {
        let mut bytes = Vec::new();
        while let Some(b) = self.peek() {
            if is_delimiter(b) {
                break;
            }
            if !is_whitespace(b) {
                bytes.push(b);
            }
            self.pos += 1;
        }

        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns up to `len` bytes from the current position for error context.
    pub fn get_context_as_string(&self, len: usize) -> String {
        let end = (self.pos + len).min(self.input.len());
        String::from_utf8_lossy(&self.input[self.pos..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new(input);
        std::iter::from_fn(|| tokenizer.next_token()).collect()
    }

    #[test]
    fn test_tokens_and_labels() {
        let tokens = collect("(Tui:1.5,(Bellbird,:0.2)Meliphagidae);");
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Label("Tui:1.5".to_string()),
                Token::Comma,
                Token::Open,
                Token::Label("Bellbird".to_string()),
                Token::Comma,
                Token::Label(":0.2".to_string()),
                Token::Close,
                Token::Label("Meliphagidae".to_string()),
                Token::Close,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_stripped_everywhere() {
        let tokens = collect(" ( Little\n Owl : 0. 5 ,\tMorepork ) ;\r\n");
        assert_eq!(tokens[1], Token::Label("LittleOwl:0.5".to_string()));
        assert_eq!(tokens[3], Token::Label("Morepork".to_string()));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_position_and_context() {
        let mut tokenizer = Tokenizer::new("(Ruru,Kiwi);");
        tokenizer.next_token();
        tokenizer.next_token();
        assert_eq!(tokenizer.position(), 5);
        assert_eq!(tokenizer.get_context_as_string(5), ",Kiwi");
        assert!(!tokenizer.is_eof());
    }
}
