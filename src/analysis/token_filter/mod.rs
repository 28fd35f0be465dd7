//! Token filter implementations for token transformation.
//!
//! This module provides filters that transform token streams. Each filter is
//! a stream transducer with a batch [`Filter`] adapter:
//!
//! - [`word_delimiter::WordDelimiterFilter`] - Splits tokens into subwords
//!   and recombines runs of them
//! - [`auto_phrase::AutoPhraseFilter`] - Merges recognized multi-word
//!   phrases into single tokens
//! - [`baseform::BaseformFilter`] - Expands terms to dictionary base forms
//!
//! # Filter Chaining
//!
//! Filters can be chained together in an analyzer to create complex
//! text processing pipelines:
//!
//! ```text
//! Tokenizer → Word Delimiter → Auto Phrase → Index
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// All token filters must implement this trait to be used in the analysis
/// pipeline. Filters receive a stream of tokens and produce a new stream,
/// allowing them to modify, filter, or augment tokens.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual filter modules
pub mod auto_phrase;
pub mod baseform;
pub mod word_delimiter;

// Re-export all filters for convenient access
pub use auto_phrase::{AutoPhraseFilter, AutoPhraseStream, PhraseDictionary};
pub use baseform::{BaseformDictionary, BaseformFilter, BaseformStream};
pub use word_delimiter::{WordDelimiterConfig, WordDelimiterFilter, WordDelimiterStream};
