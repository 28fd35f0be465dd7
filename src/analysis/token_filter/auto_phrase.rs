//! Auto-phrase filter.
//!
//! Performs "auto phrasing" on a token stream: sequences of tokens that
//! describe a single thing are recognized against a phrase dictionary and a
//! single merged token is emitted for the phrase. In replace mode the merged
//! token stands in for its constituents; in dual-emission mode the raw
//! tokens are emitted as well, with the merged token overlapping them, so
//! both granularities can be queried at once.
//!
//! Matching is greedy: with `"new york"` and `"new york city"` in the
//! dictionary, the input `"new york city hall"` produces `"new york city"`
//! and `"hall"`. When a longer candidate dies after a shorter match was
//! already confirmed, the shorter match is emitted and the overhang is
//! replayed token by token, so no input text is ever lost.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use kirigami::analysis::token::Token;
//! use kirigami::analysis::token_filter::auto_phrase::{AutoPhraseStream, PhraseDictionary};
//! use kirigami::analysis::token_source::{TokenSource, VecTokenSource, collect_tokens};
//!
//! let dictionary = Arc::new(PhraseDictionary::new(["new york"]).unwrap());
//! let source = VecTokenSource::new(vec![
//!     Token::with_offsets("new", 0, 0, 3),
//!     Token::with_offsets("york", 1, 4, 8),
//! ]);
//! let mut stream = AutoPhraseStream::new(source, dictionary, false);
//! let tokens = collect_tokens(&mut stream).unwrap();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "new york");
//! assert_eq!(tokens[0].start_offset, 0);
//! assert_eq!(tokens[0].end_offset, 8);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_source::{TokenSource, VecTokenSource};
use crate::error::{KirigamiError, Result};

/// An immutable phrase dictionary indexed by first word.
///
/// Owns every phrase; filters only read it. Construction from external
/// formats is out of scope — phrases arrive as in-memory strings with words
/// separated by whitespace.
#[derive(Clone, Debug, Default)]
pub struct PhraseDictionary {
    map: AHashMap<String, Vec<Vec<String>>>,
    len: usize,
}

impl PhraseDictionary {
    /// Build a dictionary from whitespace-joined phrases.
    ///
    /// Returns a configuration error if any phrase is empty.
    pub fn new<I, T>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut map: AHashMap<String, Vec<Vec<String>>> = AHashMap::new();
        let mut len = 0;
        for phrase in phrases {
            let words: Vec<String> = phrase
                .as_ref()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            let Some(first) = words.first() else {
                return Err(KirigamiError::config("empty phrase in phrase set"));
            };
            map.entry(first.clone()).or_default().push(words);
            len += 1;
        }
        Ok(PhraseDictionary { map, len })
    }

    /// Candidate phrases beginning with the given word.
    pub fn candidates(&self, first_word: &str) -> Option<&[Vec<String>]> {
        self.map.get(first_word).map(Vec::as_slice)
    }

    /// Number of phrases in the dictionary.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Pull-based auto-phrase transducer.
///
/// Single-pass with bounded lookahead: raw tokens consumed during a match
/// attempt are buffered and either folded into a merged phrase token or
/// replayed verbatim when the attempt is abandoned.
pub struct AutoPhraseStream<S> {
    input: S,
    dictionary: Arc<PhraseDictionary>,
    emit_single_tokens: bool,
    replace_whitespace_with: Option<char>,

    /// remaining candidate phrases consistent with the tracked run; empty
    /// means not tracking
    candidates: Vec<Vec<String>>,
    /// raw tokens accumulated since tracking started
    tracked: Vec<Token>,
    /// longest confirmed match not yet emitted, with the number of tracked
    /// tokens it covers (replace mode only)
    last_valid: Option<(Token, usize)>,
    /// raw tokens awaiting verbatim re-emission after an abandoned match
    replay: VecDeque<Token>,
    /// merged phrase queued behind its completing constituent (dual mode)
    pending_phrase: Option<Token>,
    /// raw token pulled but not yet consumed, retried against the dictionary
    lookahead: Option<Token>,

    /// running absolute position of the previously emitted token
    position: i64,
}

impl<S: TokenSource> AutoPhraseStream<S> {
    /// Create a new stream over `input`.
    ///
    /// With `emit_single_tokens` the constituents of a matched phrase are
    /// emitted alongside the merged token; otherwise the merge replaces them.
    pub fn new(input: S, dictionary: Arc<PhraseDictionary>, emit_single_tokens: bool) -> Self {
        AutoPhraseStream {
            input,
            dictionary,
            emit_single_tokens,
            replace_whitespace_with: None,
            candidates: Vec::new(),
            tracked: Vec::new(),
            last_valid: None,
            replay: VecDeque::new(),
            pending_phrase: None,
            lookahead: None,
            position: -1,
        }
    }

    /// Replace the internal spaces of merged phrase tokens with the given
    /// character (e.g. `'_'` for `"new_york"`).
    pub fn with_replace_whitespace(mut self, replacement: char) -> Self {
        self.replace_whitespace_with = Some(replacement);
        self
    }

    fn emit(&mut self, mut token: Token, increment: usize) -> Token {
        token.position_increment = increment;
        self.position += increment as i64;
        token.position = self.position.max(0) as usize;
        token
    }

    /// Build the merged token for the first `count` tracked tokens.
    fn merge_token(&self, count: usize) -> Token {
        let run = &self.tracked[..count];
        let mut text = String::new();
        for (i, token) in run.iter().enumerate() {
            if i > 0 {
                text.push(self.replace_whitespace_with.unwrap_or(' '));
            }
            text.push_str(&token.text);
        }
        Token {
            text,
            position: 0,
            start_offset: run[0].start_offset,
            end_offset: run[count - 1].end_offset,
            token_type: Some(TokenType::Phrase),
            position_increment: 1,
            position_length: count,
        }
    }

    /// Does any candidate of length > `len` start with the tracked words
    /// plus `next`?
    fn has_longer_prefix(&self, next: &str, len: usize) -> bool {
        self.candidates.iter().any(|phrase| {
            phrase.len() > len
                && phrase[len - 1] == next
                && phrase[..len - 1]
                    .iter()
                    .zip(&self.tracked)
                    .all(|(word, token)| *word == token.text)
        })
    }

    /// Index of a candidate exactly equal to the tracked words plus `next`.
    fn exact_match(&self, next: &str, len: usize) -> Option<usize> {
        self.candidates.iter().position(|phrase| {
            phrase.len() == len
                && phrase[len - 1] == next
                && phrase[..len - 1]
                    .iter()
                    .zip(&self.tracked)
                    .all(|(word, token)| *word == token.text)
        })
    }

    fn abandon(&mut self, current: Token) -> Option<Token> {
        self.candidates.clear();
        self.lookahead = Some(current);
        if let Some((merged, used)) = self.last_valid.take() {
            // replay anything consumed beyond the confirmed match
            let overhang: Vec<Token> = self.tracked.drain(used..).collect();
            self.tracked.clear();
            if !self.emit_single_tokens {
                self.replay.extend(overhang);
            }
            return Some(merged);
        }
        if !self.emit_single_tokens {
            self.replay.extend(self.tracked.drain(..));
        } else {
            // constituents were already emitted as they arrived
            self.tracked.clear();
        }
        None
    }
}

impl<S: TokenSource> TokenSource for AutoPhraseStream<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            // a completed phrase overlaps its last constituent (dual mode)
            if let Some(phrase) = self.pending_phrase.take() {
                return Ok(Some(self.emit(phrase, 0)));
            }

            // failed-match recovery: re-emit buffered raw tokens verbatim
            if let Some(token) = self.replay.pop_front() {
                return Ok(Some(self.emit(token, 1)));
            }

            let next = match self.lookahead.take() {
                Some(token) => Some(token),
                None => self.input.next_token()?,
            };

            let Some(token) = next else {
                // end of input: flush whatever has been confirmed
                if let Some((merged, used)) = self.last_valid.take() {
                    let overhang: Vec<Token> = self.tracked.drain(used..).collect();
                    self.tracked.clear();
                    self.candidates.clear();
                    if !self.emit_single_tokens {
                        self.replay.extend(overhang);
                    }
                    return Ok(Some(self.emit(merged, 1)));
                }
                if !self.tracked.is_empty() {
                    if !self.emit_single_tokens {
                        self.replay.extend(self.tracked.drain(..));
                    } else {
                        self.tracked.clear();
                    }
                    self.candidates.clear();
                    continue;
                }
                return Ok(None);
            };

            if self.candidates.is_empty() {
                // not tracking: does this token begin any phrase?
                if let Some(candidates) = self.dictionary.candidates(&token.text) {
                    self.candidates = candidates.to_vec();
                    self.tracked.clear();
                    self.tracked.push(token.clone());
                    if self.emit_single_tokens {
                        return Ok(Some(self.emit(token, 1)));
                    }
                    continue;
                }
                return Ok(Some(self.emit(token, 1)));
            }

            // tracking: try to extend the run with this token
            let len = self.tracked.len() + 1;
            let exact = self.exact_match(&token.text, len);
            let longer = self.has_longer_prefix(&token.text, len);

            if let Some(index) = exact {
                self.candidates.swap_remove(index);
                self.tracked.push(token.clone());
                let merged = self.merge_token(len);

                if longer {
                    // a longer candidate is still alive: hold the match
                    if self.emit_single_tokens {
                        self.pending_phrase = Some(merged);
                        return Ok(Some(self.emit(token, 1)));
                    }
                    self.last_valid = Some((merged, len));
                    continue;
                }

                // complete: this is the longest possible match
                self.candidates.clear();
                self.tracked.clear();
                self.last_valid = None;
                if self.emit_single_tokens {
                    self.pending_phrase = Some(merged);
                    return Ok(Some(self.emit(token, 1)));
                }
                return Ok(Some(self.emit(merged, 1)));
            }

            if longer {
                self.tracked.push(token.clone());
                if self.emit_single_tokens {
                    return Ok(Some(self.emit(token, 1)));
                }
                continue;
            }

            // no candidate fits: abandon and retry this token from the root
            if let Some(merged) = self.abandon(token) {
                return Ok(Some(self.emit(merged, 1)));
            }
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.input.reset()?;
        self.candidates.clear();
        self.tracked.clear();
        self.last_valid = None;
        self.replay.clear();
        self.pending_phrase = None;
        self.lookahead = None;
        self.position = -1;
        Ok(())
    }
}

/// Batch adapter for [`AutoPhraseStream`] usable in a filter chain.
pub struct AutoPhraseFilter {
    dictionary: Arc<PhraseDictionary>,
    emit_single_tokens: bool,
    replace_whitespace_with: Option<char>,
}

impl AutoPhraseFilter {
    /// Create a new filter over the given dictionary.
    pub fn new(dictionary: Arc<PhraseDictionary>, emit_single_tokens: bool) -> Self {
        AutoPhraseFilter {
            dictionary,
            emit_single_tokens,
            replace_whitespace_with: None,
        }
    }

    /// Replace the internal spaces of merged phrase tokens.
    pub fn with_replace_whitespace(mut self, replacement: char) -> Self {
        self.replace_whitespace_with = Some(replacement);
        self
    }
}

impl Filter for AutoPhraseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let source = VecTokenSource::new(tokens.collect());
        let mut stream =
            AutoPhraseStream::new(source, self.dictionary.clone(), self.emit_single_tokens);
        if let Some(replacement) = self.replace_whitespace_with {
            stream = stream.with_replace_whitespace(replacement);
        }
        let mut output = Vec::new();
        while let Some(token) = stream.next_token()? {
            output.push(token);
        }
        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "auto_phrase"
    }
}
