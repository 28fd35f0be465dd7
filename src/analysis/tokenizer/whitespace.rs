//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Offsets are character offsets, so downstream filters that index into
/// token text by character can trust `end_offset - start_offset` to equal
/// the token's character length.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut position = 0;
        let mut word = String::new();
        let mut word_start = 0;

        for (index, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                if !word.is_empty() {
                    tokens.push(Self::make_token(&word, position, word_start, index));
                    position += 1;
                    word.clear();
                }
            } else {
                if word.is_empty() {
                    word_start = index;
                }
                word.push(ch);
            }
        }
        if !word.is_empty() {
            let end = word_start + word.chars().count();
            tokens.push(Self::make_token(&word, position, word_start, end));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

impl WhitespaceTokenizer {
    fn make_token(word: &str, position: usize, start: usize, end: usize) -> Token {
        Token::with_offsets(word, position, start, end).with_token_type(Self::detect_token_type(word))
    }

    /// Detect token type based on the content of the word.
    fn detect_token_type(word: &str) -> TokenType {
        if word.chars().all(|c| c.is_ascii_digit()) {
            return TokenType::Num;
        }
        if word.chars().all(|c| c.is_ascii_punctuation()) {
            return TokenType::Punctuation;
        }
        if word.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return TokenType::Alphanum;
        }
        TokenType::Other
    }
}
