//! Token types and utilities for text analysis.
//!
//! This module defines the core data structures for representing text tokens,
//! which are the fundamental units that flow through the analysis pipeline.
//!
//! # Token Graphs
//!
//! Tokens support graph structures through `position_increment` and
//! `position_length` fields, enabling proper handling of subword splits and
//! multi-word phrase merges:
//!
//! ```text
//! Input: "new york hall" with phrase "new york"
//!
//! Token Graph:
//!   Position 0: "new"      (pos_inc=1, pos_len=1)
//!   Position 1: "york"     (pos_inc=1, pos_len=1)
//!   Position 1: "new york" (pos_inc=0, pos_len=2)  ← same position, spans 2
//!   Position 2: "hall"     (pos_inc=1, pos_len=1)
//! ```
//!
//! # Examples
//!
//! Creating a simple token:
//!
//! ```
//! use kirigami::analysis::token::Token;
//!
//! let token = Token::new("hello", 0);
//! assert_eq!(token.text, "hello");
//! assert_eq!(token.position, 0);
//! assert_eq!(token.position_increment, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// This is the fundamental unit that flows through the analysis pipeline.
/// Offsets are character offsets into the original text. Normally
/// `end_offset - start_offset` equals the character length of `text`; the
/// word-delimiter filter detects a mismatch (synonym-expanded upstreams) and
/// then inherits offsets verbatim instead of recomputing them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based, the running
    /// sum of position increments)
    pub position: usize,

    /// The character offset where this token starts in the original text
    pub start_offset: usize,

    /// The character offset where this token ends in the original text
    pub end_offset: usize,

    /// Token type classification, carried through filters unchanged
    pub token_type: Option<TokenType>,

    /// Position increment from the previous emitted token (default: 1).
    ///
    /// - 1: normal increment, next position
    /// - 0: same position as the previous token (overlapping alternatives,
    ///   e.g. a catenated run sharing the slot of its last subword)
    /// - >1: skipped positions (e.g. dropped all-delimiter tokens)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    ///
    /// Merged phrase tokens span as many positions as they have constituent
    /// words.
    pub position_length: usize,
}

/// Token type classification for different kinds of tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphanumeric text
    Alphanum,
    /// Numeric values
    Num,
    /// Punctuation marks
    Punctuation,
    /// Whitespace
    Whitespace,
    /// Merged multi-word phrase (generated by the auto-phrase filter)
    Phrase,
    /// Injected alternative form (generated by the baseform filter)
    Synonym,
    /// Other/unknown token types
    Other,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            token_type: None,
            position_increment: 1,
            position_length: 1,
        }
    }

    /// Create a new token with text, position, and character offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            token_type: None,
            position_increment: 1,
            position_length: 1,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
