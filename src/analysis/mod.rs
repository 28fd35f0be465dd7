//! Text analysis module for Kirigami.
//!
//! This module provides the token data model, pull-based token sources, the
//! token stream transducers that are the core of the crate, and the pipeline
//! glue to combine them with tokenizers.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod token_source;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use token_source::*;
pub use tokenizer::*;
