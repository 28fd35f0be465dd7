//! Delimiter break iterator.
//!
//! Scans one token's characters and yields successive subword spans according
//! to the configured break rules: delimiter characters always break, case
//! transitions break when `split_on_case_change` is set, and letter↔digit
//! transitions break when `split_on_numerics` is set. A trailing English
//! possessive (`'s` / `'S`) is excluded from the final span when
//! `stem_english_possessive` is set.
//!
//! Exhaustion is signaled by the [`DONE`] sentinel, not an error.

use std::sync::Arc;

/// Lower-case letter character class.
pub const LOWER: u32 = 0x01;
/// Upper-case letter character class.
pub const UPPER: u32 = 0x02;
/// Digit character class.
pub const DIGIT: u32 = 0x04;
/// Delimiter character class (anything that is not a letter or digit).
pub const SUBWORD_DELIM: u32 = 0x08;

/// Any letter.
pub const ALPHA: u32 = LOWER | UPPER;
/// Any letter or digit.
pub const ALPHANUM: u32 = ALPHA | DIGIT;

/// Sentinel span end marking iterator exhaustion.
pub const DONE: usize = usize::MAX;

/// Check whether a word type includes a letter class.
pub fn is_alpha(word_type: u32) -> bool {
    word_type & ALPHA != 0
}

/// Check whether a word type includes the digit class.
pub fn is_digit(word_type: u32) -> bool {
    word_type & DIGIT != 0
}

/// Check whether a word type includes the upper-case class.
pub fn is_upper(word_type: u32) -> bool {
    word_type & UPPER != 0
}

/// Check whether a word type includes the delimiter class.
pub fn is_subword_delim(word_type: u32) -> bool {
    word_type & SUBWORD_DELIM != 0
}

/// Character classification table for the break iterator.
///
/// The first 256 code points are table-driven; everything above falls back to
/// Unicode category checks. Custom tables arrive fully constructed; the
/// `Default` table classifies ASCII letters, digits and treats every other
/// character as a subword delimiter.
#[derive(Clone)]
pub struct CharTypeTable {
    table: [u8; 256],
}

impl CharTypeTable {
    /// Create a table from raw per-code-point classes for the first 256 code
    /// points.
    pub fn from_raw(table: [u8; 256]) -> Self {
        CharTypeTable { table }
    }

    /// Classify a single character.
    pub fn classify(&self, ch: char) -> u32 {
        let code = ch as usize;
        if code < self.table.len() {
            return self.table[code] as u32;
        }
        if ch.is_lowercase() {
            LOWER
        } else if ch.is_uppercase() {
            UPPER
        } else if ch.is_numeric() {
            DIGIT
        } else if ch.is_alphabetic() {
            ALPHA
        } else {
            SUBWORD_DELIM
        }
    }
}

impl Default for CharTypeTable {
    fn default() -> Self {
        let mut table = [0u8; 256];
        for (code, entry) in table.iter_mut().enumerate() {
            let ch = char::from(code as u8);
            let class = if ch.is_lowercase() {
                LOWER
            } else if ch.is_uppercase() {
                UPPER
            } else if ch.is_numeric() {
                DIGIT
            } else {
                SUBWORD_DELIM
            };
            *entry = class as u8;
        }
        CharTypeTable { table }
    }
}

impl std::fmt::Debug for CharTypeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharTypeTable").finish_non_exhaustive()
    }
}

/// Iterates the subword spans of a single token's text.
///
/// `current..end` is the half-open character range of the current span;
/// `end == DONE` once the token is exhausted. `start_bounds..end_bounds` is
/// the token with leading and trailing delimiters stripped, used to decide
/// whether a span covers the whole word.
#[derive(Debug)]
pub struct WordDelimiterIterator {
    table: Arc<CharTypeTable>,
    split_on_case_change: bool,
    split_on_numerics: bool,
    stem_english_possessive: bool,

    text: Vec<char>,
    current: usize,
    end: usize,
    start_bounds: usize,
    end_bounds: usize,
    skip_possessive: bool,
    has_final_possessive: bool,
}

impl WordDelimiterIterator {
    /// Create a new iterator with the given classification table and break
    /// rules. Call [`set_text`](Self::set_text) before iterating.
    pub fn new(
        table: Arc<CharTypeTable>,
        split_on_case_change: bool,
        split_on_numerics: bool,
        stem_english_possessive: bool,
    ) -> Self {
        WordDelimiterIterator {
            table,
            split_on_case_change,
            split_on_numerics,
            stem_english_possessive,
            text: Vec::new(),
            current: 0,
            end: 0,
            start_bounds: 0,
            end_bounds: 0,
            skip_possessive: false,
            has_final_possessive: false,
        }
    }

    /// Reset the iterator over a new token's characters.
    pub fn set_text(&mut self, chars: &[char]) {
        self.text.clear();
        self.text.extend_from_slice(chars);
        self.current = 0;
        self.end = 0;
        self.start_bounds = 0;
        self.end_bounds = self.text.len();
        self.skip_possessive = false;
        self.has_final_possessive = false;
        self.set_bounds();
    }

    /// Advance to the next subword span. Returns the new span end, or
    /// [`DONE`] when the token is exhausted.
    pub fn next(&mut self) -> usize {
        self.current = self.end;
        if self.current == DONE {
            return DONE;
        }

        if self.skip_possessive {
            self.current += 2;
            self.skip_possessive = false;
        }

        // skip leading delimiters
        let mut last_type = 0u32;
        while self.current < self.end_bounds {
            last_type = self.table.classify(self.text[self.current]);
            if !is_subword_delim(last_type) {
                break;
            }
            self.current += 1;
        }

        if self.current >= self.end_bounds {
            self.end = DONE;
            return DONE;
        }

        self.end = self.current + 1;
        while self.end < self.end_bounds {
            let word_type = self.table.classify(self.text[self.end]);
            if self.is_break(last_type, word_type) {
                break;
            }
            last_type = word_type;
            self.end += 1;
        }

        if self.end < self.end_bounds - 1 && self.ends_with_possessive(self.end + 2) {
            self.skip_possessive = true;
        }

        self.end
    }

    /// Start of the current span (character index).
    pub fn current(&self) -> usize {
        self.current
    }

    /// End of the current span (character index, exclusive), or [`DONE`].
    pub fn end(&self) -> usize {
        self.end
    }

    /// The characters of the current span. Only valid while `end != DONE`.
    pub fn span(&self) -> &[char] {
        &self.text[self.current..self.end]
    }

    /// True when the current span covers the entire delimiter-stripped token,
    /// i.e. the word had leading or trailing delimiters but no internal
    /// break. Such spans bypass all concatenation logic.
    pub fn is_single_word(&self) -> bool {
        if self.has_final_possessive {
            self.current == self.start_bounds && self.end == self.end_bounds - 2
        } else {
            self.current == self.start_bounds && self.end == self.end_bounds
        }
    }

    /// Word type of the current span: ALPHA for any letter span, otherwise
    /// the class of the first character. Returns 0 once exhausted.
    pub fn word_type(&self) -> u32 {
        if self.end == DONE {
            return 0;
        }
        let word_type = self.table.classify(self.text[self.current]);
        if is_alpha(word_type) { ALPHA } else { word_type }
    }

    fn is_break(&self, last_type: u32, word_type: u32) -> bool {
        if word_type & last_type != 0 {
            return false;
        }
        if !self.split_on_case_change && is_alpha(last_type) && is_alpha(word_type) {
            // case transitions are not breaks unless configured
            return false;
        }
        if is_upper(last_type) && is_alpha(word_type) {
            // UPPER followed by any letter continues the span ("ABcd")
            return false;
        }
        if !self.split_on_numerics
            && ((is_alpha(last_type) && is_digit(word_type))
                || (is_digit(last_type) && is_alpha(word_type)))
        {
            return false;
        }
        true
    }

    fn set_bounds(&mut self) {
        while self.start_bounds < self.text.len()
            && is_subword_delim(self.table.classify(self.text[self.start_bounds]))
        {
            self.start_bounds += 1;
        }
        while self.end_bounds > self.start_bounds
            && is_subword_delim(self.table.classify(self.text[self.end_bounds - 1]))
        {
            self.end_bounds -= 1;
        }
        if self.ends_with_possessive(self.end_bounds) {
            self.has_final_possessive = true;
        }
        self.current = self.start_bounds;
    }

    fn ends_with_possessive(&self, pos: usize) -> bool {
        self.stem_english_possessive
            && pos > 2
            && self.text[pos - 2] == '\''
            && (self.text[pos - 1] == 's' || self.text[pos - 1] == 'S')
            && is_alpha(self.table.classify(self.text[pos - 3]))
            && (pos == self.end_bounds
                || is_subword_delim(self.table.classify(self.text[pos])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str, case_change: bool, numerics: bool, possessive: bool) -> Vec<String> {
        let table = Arc::new(CharTypeTable::default());
        let mut iter = WordDelimiterIterator::new(table, case_change, numerics, possessive);
        let chars: Vec<char> = text.chars().collect();
        iter.set_text(&chars);
        let mut out = Vec::new();
        while iter.next() != DONE {
            out.push(iter.span().iter().collect::<String>());
        }
        out
    }

    #[test]
    fn test_delimiter_split() {
        assert_eq!(spans("Wi-Fi", false, false, false), vec!["Wi", "Fi"]);
    }

    #[test]
    fn test_case_change_split() {
        assert_eq!(spans("PowerShot", true, false, false), vec!["Power", "Shot"]);
        // disabled: no internal break
        assert_eq!(spans("PowerShot", false, false, false), vec!["PowerShot"]);
    }

    #[test]
    fn test_upper_run_is_not_split() {
        // an upper-case run followed by letters continues the span
        assert_eq!(spans("ABcd", true, false, false), vec!["ABcd"]);
    }

    #[test]
    fn test_numeric_split() {
        assert_eq!(spans("SD500", false, true, false), vec!["SD", "500"]);
        assert_eq!(spans("SD500", false, false, false), vec!["SD500"]);
    }

    #[test]
    fn test_leading_trailing_delimiters() {
        assert_eq!(
            spans("//hello---there,", false, false, false),
            vec!["hello", "there"]
        );
    }

    #[test]
    fn test_possessive_stemming() {
        assert_eq!(spans("O'Neil's", false, false, true), vec!["O", "Neil"]);
        assert_eq!(spans("O'Neil's", false, false, false), vec!["O", "Neil", "s"]);
    }

    #[test]
    fn test_all_delimiters_is_done_immediately() {
        assert_eq!(spans("---", false, false, false), Vec::<String>::new());
    }

    #[test]
    fn test_is_single_word() {
        let table = Arc::new(CharTypeTable::default());
        let mut iter = WordDelimiterIterator::new(table, false, false, false);

        let chars: Vec<char> = "//dude//".chars().collect();
        iter.set_text(&chars);
        assert_ne!(iter.next(), DONE);
        assert!(iter.is_single_word());

        let chars: Vec<char> = "wi-fi".chars().collect();
        iter.set_text(&chars);
        assert_ne!(iter.next(), DONE);
        assert!(!iter.is_single_word());
    }

    #[test]
    fn test_single_word_with_possessive() {
        let table = Arc::new(CharTypeTable::default());
        let mut iter = WordDelimiterIterator::new(table, false, false, true);
        let chars: Vec<char> = "dude's".chars().collect();
        iter.set_text(&chars);
        assert_ne!(iter.next(), DONE);
        assert_eq!(iter.span().iter().collect::<String>(), "dude");
        assert!(iter.is_single_word());
        assert_eq!(iter.next(), DONE);
    }

    #[test]
    fn test_word_type() {
        let table = Arc::new(CharTypeTable::default());
        let mut iter = WordDelimiterIterator::new(table, false, true, false);
        let chars: Vec<char> = "SD500".chars().collect();
        iter.set_text(&chars);
        iter.next();
        assert!(is_alpha(iter.word_type()));
        iter.next();
        assert!(is_digit(iter.word_type()));
    }

    #[test]
    fn test_unicode_fallback() {
        let table = CharTypeTable::default();
        assert_eq!(table.classify('日'), ALPHA);
        assert_eq!(table.classify('Ā'), UPPER);
        assert_eq!(table.classify('ā'), LOWER);
        assert_eq!(table.classify('×'), SUBWORD_DELIM);
    }

    #[test]
    fn test_no_internal_break_bounds() {
        // "hello" spans the whole token: current == 0, end == len
        let table = Arc::new(CharTypeTable::default());
        let mut iter = WordDelimiterIterator::new(table, false, false, false);
        let chars: Vec<char> = "hello".chars().collect();
        iter.set_text(&chars);
        iter.next();
        assert_eq!(iter.current(), 0);
        assert_eq!(iter.end(), 5);
    }
}
