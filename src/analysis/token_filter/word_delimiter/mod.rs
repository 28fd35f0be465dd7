//! Word delimiter filter.
//!
//! Splits tokens into subwords and performs optional transformations on
//! subword groups:
//!
//! - split on intra-word delimiters: `"Wi-Fi"` → `"Wi"`, `"Fi"`
//! - split on case transitions: `"PowerShot"` → `"Power"`, `"Shot"`
//! - split on letter-number transitions: `"SD500"` → `"SD"`, `"500"`
//! - leading and trailing delimiters are ignored: `"//hello---there"` →
//!   `"hello"`, `"there"`
//! - trailing possessives are removed: `"O'Neil's"` → `"O"`, `"Neil"`
//!
//! Catenation options additionally merge runs of same-type subwords into a
//! combined token emitted at the position of the last subword in the run,
//! so `"wi-fi"` indexed with [`WordDelimiterConfig::catenate_words`] matches
//! `"wifi"`, `"wi fi"` and `"wi-fi"` queries alike.
//!
//! # Examples
//!
//! ```
//! use kirigami::analysis::token::Token;
//! use kirigami::analysis::token_filter::word_delimiter::{
//!     WordDelimiterConfig, WordDelimiterStream,
//! };
//! use kirigami::analysis::token_source::{TokenSource, VecTokenSource, collect_tokens};
//!
//! let config = WordDelimiterConfig {
//!     generate_word_parts: true,
//!     ..Default::default()
//! };
//! let source = VecTokenSource::new(vec![Token::with_offsets("Wi-Fi", 0, 0, 5)]);
//! let mut stream = WordDelimiterStream::new(source, config);
//! let tokens = collect_tokens(&mut stream).unwrap();
//!
//! assert_eq!(tokens[0].text, "Wi");
//! assert_eq!(tokens[1].text, "Fi");
//! ```

pub mod iterator;

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_source::{TokenSource, VecTokenSource};
use crate::error::Result;

use iterator::{CharTypeTable, DONE, WordDelimiterIterator, is_alpha, is_digit};

/// Configuration flags for the word delimiter filter.
///
/// All flags are independent and default to `false`. Invalid combinations are
/// the responsibility of whoever builds the configuration; nothing is
/// validated mid-stream.
#[derive(Clone, Debug, Default)]
pub struct WordDelimiterConfig {
    /// Emit subwords of letter runs as standalone tokens.
    pub generate_word_parts: bool,
    /// Emit subwords of digit runs as standalone tokens.
    pub generate_number_parts: bool,
    /// Merge maximum runs of letter subwords into one combined token.
    pub catenate_words: bool,
    /// Merge maximum runs of digit subwords into one combined token.
    pub catenate_numbers: bool,
    /// Merge all subwords of a token, regardless of type, into one token.
    pub catenate_all: bool,
    /// Emit the unmodified input token before any generated subwords.
    pub preserve_original: bool,
    /// Break subwords at lower→upper and upper→lower transitions.
    pub split_on_case_change: bool,
    /// Break subwords at letter↔digit transitions.
    pub split_on_numerics: bool,
    /// Strip a trailing `'s` / `'S` from the token.
    pub stem_english_possessive: bool,
    /// Emit every generated subword at the same position (increment 0).
    pub all_parts_at_same_position: bool,
}

/// A concatenated run of same-typed subwords.
#[derive(Debug, Default)]
struct Concatenation {
    buffer: String,
    start_offset: usize,
    end_offset: usize,
    word_type: u32,
    subword_count: usize,
}

impl Concatenation {
    fn append(&mut self, span: &[char]) {
        self.buffer.extend(span.iter());
        self.subword_count += 1;
    }

    fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.start_offset = 0;
        self.end_offset = 0;
        self.word_type = 0;
        self.subword_count = 0;
    }
}

/// Pull-based word delimiter transducer.
///
/// Pulls tokens from the upstream source and emits exactly one token per
/// [`next_token`](TokenSource::next_token) call, re-entering the per-token
/// state machine across calls. Not safe for concurrent use; one sequence at
/// a time.
pub struct WordDelimiterStream<S> {
    input: S,
    config: WordDelimiterConfig,
    protected_words: Option<Arc<AHashSet<String>>>,

    iterator: WordDelimiterIterator,
    concat: Concatenation,
    concat_all: Concatenation,
    /// number of subwords in the last flushed concatenation
    last_concat_count: usize,
    /// accumulated position increment gap from dropped or pending tokens
    accum_pos_inc: usize,

    saved_start_offset: usize,
    saved_end_offset: usize,
    saved_type: Option<TokenType>,
    has_saved_state: bool,
    /// offset span didn't match the text length: a synonym-expanded upstream,
    /// generated subwords reuse the saved whole-token offsets
    has_illegal_offsets: bool,

    /// have we emitted anything for the current input token?
    has_output_token: bool,
    /// when preserve_original is on, the first token following the original
    /// must get increment 0
    has_output_following_original: bool,

    /// running absolute position (sum of emitted increments)
    position: i64,
}

impl<S: TokenSource> WordDelimiterStream<S> {
    /// Create a new stream over `input` with the default character table and
    /// no protected words.
    pub fn new(input: S, config: WordDelimiterConfig) -> Self {
        Self::with_table(input, config, Arc::new(CharTypeTable::default()), None)
    }

    /// Create a new stream with a custom character-classification table and
    /// an optional set of words protected from splitting.
    pub fn with_table(
        input: S,
        config: WordDelimiterConfig,
        table: Arc<CharTypeTable>,
        protected_words: Option<Arc<AHashSet<String>>>,
    ) -> Self {
        let iterator = WordDelimiterIterator::new(
            table,
            config.split_on_case_change,
            config.split_on_numerics,
            config.stem_english_possessive,
        );
        WordDelimiterStream {
            input,
            config,
            protected_words,
            iterator,
            concat: Concatenation::default(),
            concat_all: Concatenation::default(),
            last_concat_count: 0,
            accum_pos_inc: 0,
            saved_start_offset: 0,
            saved_end_offset: 0,
            saved_type: None,
            has_saved_state: false,
            has_illegal_offsets: false,
            has_output_token: false,
            has_output_following_original: false,
            position: -1,
        }
    }

    fn is_protected(&self, text: &str) -> bool {
        self.protected_words
            .as_ref()
            .is_some_and(|words| words.contains(text))
    }

    fn save_state(&mut self, token: &Token) {
        self.saved_start_offset = token.start_offset;
        self.saved_end_offset = token.end_offset;
        self.saved_type = token.token_type;
        self.has_illegal_offsets =
            token.end_offset - token.start_offset != token.char_len();
        self.has_saved_state = true;
    }

    /// Position increment for the next generated token. `inject` is true for
    /// concatenation flushes, which occupy the slot of the run they
    /// summarize.
    fn next_increment(&mut self, inject: bool) -> usize {
        let floor = if self.config.all_parts_at_same_position { 0 } else { 1 };
        let pos_inc = self.accum_pos_inc;

        if self.has_output_token {
            self.accum_pos_inc = 0;
            return if inject { 0 } else { floor.max(pos_inc) };
        }

        self.has_output_token = true;
        if !self.has_output_following_original {
            // the first token following the preserved original is 0 regardless
            self.has_output_following_original = true;
            return 0;
        }
        self.accum_pos_inc = 0;
        floor.max(pos_inc)
    }

    fn make_token(&mut self, text: String, start: usize, end: usize, inc: usize) -> Token {
        self.position += inc as i64;
        Token {
            text,
            position: self.position.max(0) as usize,
            start_offset: start,
            end_offset: end,
            token_type: self.saved_type,
            position_increment: inc,
            position_length: 1,
        }
    }

    fn passthrough(&mut self, mut token: Token) -> Token {
        let inc = self.accum_pos_inc;
        self.accum_pos_inc = 0;
        token.position_increment = inc;
        self.position += inc as i64;
        token.position = self.position.max(0) as usize;
        token
    }

    fn generate_part(&mut self, is_single_word: bool) -> Token {
        let text: String = self.iterator.span().iter().collect();
        let start = self.saved_start_offset + self.iterator.current();
        let end = self.saved_start_offset + self.iterator.end();

        let (start, end) = if self.has_illegal_offsets {
            if is_single_word && start <= self.saved_end_offset {
                (start, self.saved_end_offset)
            } else {
                (self.saved_start_offset, self.saved_end_offset)
            }
        } else {
            (start, end)
        };

        let inc = self.next_increment(false);
        self.make_token(text, start, end, inc)
    }

    fn append_to(concat: &mut Concatenation, iter: &WordDelimiterIterator, saved_start: usize) {
        if concat.is_empty() {
            concat.start_offset = saved_start + iter.current();
        }
        concat.append(iter.span());
        concat.end_offset = saved_start + iter.end();
    }

    fn write_concat(&mut self, all: bool) -> Token {
        let concat = if all { &self.concat_all } else { &self.concat };
        let text = concat.buffer.clone();
        let (start, end) = if self.has_illegal_offsets {
            (self.saved_start_offset, self.saved_end_offset)
        } else {
            (concat.start_offset, concat.end_offset)
        };
        let inc = self.next_increment(true);
        self.accum_pos_inc = 0;
        self.make_token(text, start, end, inc)
    }

    /// Flush the type concatenation. Emits it unless it holds exactly one
    /// subword that part generation would emit separately anyway.
    fn flush_concat(&mut self) -> Option<Token> {
        self.last_concat_count = self.concat.subword_count;
        if self.concat.subword_count != 1 || !self.should_generate_parts(self.concat.word_type) {
            let token = self.write_concat(false);
            self.concat.clear();
            return Some(token);
        }
        self.concat.clear();
        None
    }

    fn should_concatenate(&self, word_type: u32) -> bool {
        (self.config.catenate_words && is_alpha(word_type))
            || (self.config.catenate_numbers && is_digit(word_type))
    }

    fn should_generate_parts(&self, word_type: u32) -> bool {
        (self.config.generate_word_parts && is_alpha(word_type))
            || (self.config.generate_number_parts && is_digit(word_type))
    }
}

impl<S: TokenSource> TokenSource for WordDelimiterStream<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            if !self.has_saved_state {
                // process a new input word
                let Some(token) = self.input.next_token()? else {
                    return Ok(None);
                };

                let term_len = token.char_len();
                self.accum_pos_inc += token.position_increment;

                let chars: Vec<char> = token.text.chars().collect();
                self.iterator.set_text(&chars);
                self.iterator.next();

                // word of no delimiters, or protected word: just return it
                if (self.iterator.current() == 0 && self.iterator.end() == term_len)
                    || self.is_protected(&token.text)
                {
                    return Ok(Some(self.passthrough(token)));
                }

                // word of simply delimiters
                if self.iterator.end() == DONE && !self.config.preserve_original {
                    // if the increment was 1, simply ignore it in the accumulation
                    if token.position_increment == 1 {
                        self.accum_pos_inc -= 1;
                    }
                    continue;
                }

                self.save_state(&token);
                self.has_output_token = false;
                self.has_output_following_original = !self.config.preserve_original;
                self.last_concat_count = 0;

                if self.config.preserve_original {
                    return Ok(Some(self.passthrough(token)));
                }
            }

            // at the end of the token, output any concatenations
            if self.iterator.end() == DONE {
                if !self.concat.is_empty() {
                    if let Some(token) = self.flush_concat() {
                        return Ok(Some(token));
                    }
                }

                if !self.concat_all.is_empty() {
                    // only if this exact combination wasn't flushed above
                    if self.concat_all.subword_count > self.last_concat_count {
                        let token = self.write_concat(true);
                        self.concat_all.clear();
                        return Ok(Some(token));
                    }
                    self.concat_all.clear();
                }

                // on to the next input word
                self.has_saved_state = false;
                continue;
            }

            // word surrounded by delimiters: always output
            if self.iterator.is_single_word() {
                let token = self.generate_part(true);
                self.iterator.next();
                return Ok(Some(token));
            }

            let word_type = self.iterator.word_type();

            // queued concatenation of an incompatible type? flush it first
            if !self.concat.is_empty() && self.concat.word_type & word_type == 0 {
                let flushed = self.flush_concat();
                self.has_output_token = false;
                if let Some(token) = flushed {
                    return Ok(Some(token));
                }
            }

            if self.should_concatenate(word_type) {
                if self.concat.is_empty() {
                    self.concat.word_type = word_type;
                }
                Self::append_to(&mut self.concat, &self.iterator, self.saved_start_offset);
            }

            if self.config.catenate_all {
                Self::append_to(&mut self.concat_all, &self.iterator, self.saved_start_offset);
            }

            if self.should_generate_parts(word_type) {
                let token = self.generate_part(false);
                self.iterator.next();
                return Ok(Some(token));
            }

            self.iterator.next();
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.input.reset()?;
        self.has_saved_state = false;
        self.concat.clear();
        self.concat_all.clear();
        self.last_concat_count = 0;
        self.accum_pos_inc = 0;
        self.has_output_token = false;
        self.has_output_following_original = false;
        self.has_illegal_offsets = false;
        self.saved_type = None;
        self.position = -1;
        Ok(())
    }
}

/// Batch adapter for [`WordDelimiterStream`] usable in a filter chain.
///
/// Shared read-only resources (character table, protected words) live here
/// behind `Arc`; every mutable buffer lives in the per-call stream, which
/// keeps the filter `Send + Sync`.
pub struct WordDelimiterFilter {
    config: WordDelimiterConfig,
    table: Arc<CharTypeTable>,
    protected_words: Option<Arc<AHashSet<String>>>,
}

impl WordDelimiterFilter {
    /// Create a new filter with the default character table.
    pub fn new(config: WordDelimiterConfig) -> Self {
        WordDelimiterFilter {
            config,
            table: Arc::new(CharTypeTable::default()),
            protected_words: None,
        }
    }

    /// Use a custom character-classification table.
    pub fn with_table(mut self, table: Arc<CharTypeTable>) -> Self {
        self.table = table;
        self
    }

    /// Protect the given words from being split.
    pub fn with_protected_words<I, T>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.protected_words = Some(Arc::new(words.into_iter().map(Into::into).collect()));
        self
    }
}

impl Filter for WordDelimiterFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let source = VecTokenSource::new(tokens.collect());
        let mut stream = WordDelimiterStream::with_table(
            source,
            self.config.clone(),
            self.table.clone(),
            self.protected_words.clone(),
        );
        let mut output = Vec::new();
        while let Some(token) = stream.next_token()? {
            output.push(token);
        }
        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word_delimiter"
    }
}
