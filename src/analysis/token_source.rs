//! Pull-based token source contract.
//!
//! A [`TokenSource`] hands out one token per call, pulling from whatever is
//! upstream on demand. Both stream transducers in this crate consume a
//! `TokenSource` and implement it themselves, so stages chain freely:
//!
//! ```text
//! tokenizer output → WordDelimiterStream → AutoPhraseStream → consumer
//! ```
//!
//! # Examples
//!
//! ```
//! use kirigami::analysis::token::Token;
//! use kirigami::analysis::token_source::{TokenSource, VecTokenSource};
//!
//! let mut source = VecTokenSource::new(vec![Token::new("hello", 0)]);
//! let token = source.next_token().unwrap().unwrap();
//! assert_eq!(token.text, "hello");
//! assert!(source.next_token().unwrap().is_none());
//!
//! source.reset().unwrap();
//! assert!(source.next_token().unwrap().is_some());
//! ```

use crate::analysis::token::Token;
use crate::error::Result;

/// A pull-based source of tokens.
///
/// `next_token` returns `Ok(Some(token))` until the sequence is exhausted,
/// then `Ok(None)`. An `Err` signals an upstream read failure; the sequence
/// is unusable afterwards. `reset` reinitializes the source for a new pass
/// over a fresh (or the same) sequence.
///
/// Implementations must supply tokens with non-decreasing offsets within one
/// sequence; consumers do not validate this.
pub trait TokenSource {
    /// Advance to the next token, or `None` at end of stream.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// Reinitialize for a new sequence.
    fn reset(&mut self) -> Result<()>;
}

/// A token source backed by an in-memory vector of tokens.
///
/// Used to feed the stream transducers from collected tokenizer output, and
/// as the upstream in tests and benchmarks.
#[derive(Clone, Debug, Default)]
pub struct VecTokenSource {
    tokens: Vec<Token>,
    cursor: usize,
}

impl VecTokenSource {
    /// Create a new source over the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        VecTokenSource { tokens, cursor: 0 }
    }
}

impl TokenSource for VecTokenSource {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if self.cursor < self.tokens.len() {
            let token = self.tokens[self.cursor].clone();
            self.cursor += 1;
            Ok(Some(token))
        } else {
            Ok(None)
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }
}

/// Drain a token source to completion, collecting the emitted tokens.
pub fn collect_tokens<S: TokenSource>(source: &mut S) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    while let Some(token) = source.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_token_source() {
        let mut source = VecTokenSource::new(vec![
            Token::new("hello", 0),
            Token::new("world", 1),
        ]);

        assert_eq!(source.next_token().unwrap().unwrap().text, "hello");
        assert_eq!(source.next_token().unwrap().unwrap().text, "world");
        assert!(source.next_token().unwrap().is_none());
        // stays exhausted
        assert!(source.next_token().unwrap().is_none());
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut source = VecTokenSource::new(vec![Token::new("a", 0)]);
        assert!(source.next_token().unwrap().is_some());
        assert!(source.next_token().unwrap().is_none());

        source.reset().unwrap();
        assert_eq!(source.next_token().unwrap().unwrap().text, "a");
    }

    #[test]
    fn test_collect_tokens() {
        let mut source = VecTokenSource::new(vec![
            Token::new("a", 0),
            Token::new("b", 1),
            Token::new("c", 2),
        ]);
        let tokens = collect_tokens(&mut source).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, "c");
    }
}
