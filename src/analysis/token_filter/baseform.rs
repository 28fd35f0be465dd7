//! Baseform filter.
//!
//! Expands a term to its canonical base form via a precomputed dictionary.
//! The surface form passes through unchanged; on a dictionary hit the base
//! form is queued and emitted on the next pull at position increment 0 with
//! the same offsets, so both forms occupy the same slot.

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_source::{TokenSource, VecTokenSource};
use crate::error::Result;

/// Exact word → canonical base form lookup. Construction from external
/// dictionary formats is out of scope; entries arrive as in-memory pairs.
#[derive(Clone, Debug, Default)]
pub struct BaseformDictionary {
    map: AHashMap<String, String>,
}

impl BaseformDictionary {
    /// Build a dictionary from (surface form, base form) pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        BaseformDictionary {
            map: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up the base form of a word.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.map.get(word).map(String::as_str)
    }
}

/// Pull-based baseform transducer. A simple queue, no state machine.
pub struct BaseformStream<S> {
    input: S,
    dictionary: Arc<BaseformDictionary>,
    queue: VecDeque<Token>,
}

impl<S: TokenSource> BaseformStream<S> {
    /// Create a new stream over `input`.
    pub fn new(input: S, dictionary: Arc<BaseformDictionary>) -> Self {
        BaseformStream {
            input,
            dictionary,
            queue: VecDeque::new(),
        }
    }
}

impl<S: TokenSource> TokenSource for BaseformStream<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(token) = self.queue.pop_front() {
            return Ok(Some(token));
        }
        let Some(token) = self.input.next_token()? else {
            return Ok(None);
        };
        if let Some(base) = self.dictionary.lookup(&token.text) {
            if !base.is_empty() && base != token.text {
                let mut expanded = token.clone();
                expanded.text = base.to_string();
                expanded.position_increment = 0;
                expanded.token_type = Some(TokenType::Synonym);
                self.queue.push_back(expanded);
            }
        }
        Ok(Some(token))
    }

    fn reset(&mut self) -> Result<()> {
        self.input.reset()?;
        self.queue.clear();
        Ok(())
    }
}

/// Batch adapter for [`BaseformStream`] usable in a filter chain.
pub struct BaseformFilter {
    dictionary: Arc<BaseformDictionary>,
}

impl BaseformFilter {
    /// Create a new filter over the given dictionary.
    pub fn new(dictionary: Arc<BaseformDictionary>) -> Self {
        BaseformFilter { dictionary }
    }
}

impl Filter for BaseformFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let source = VecTokenSource::new(tokens.collect());
        let mut stream = BaseformStream::new(source, self.dictionary.clone());
        let mut output = Vec::new();
        while let Some(token) = stream.next_token()? {
            output.push(token);
        }
        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "baseform"
    }
}
