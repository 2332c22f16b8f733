//! Sentence segmentation.
//!
//! Two rules are available:
//!
//! - [`LinguisticSegmenter`] keeps terminal punctuation and avoids splitting
//!   inside decimals ("3.14"), after known abbreviations ("Mr. Smith",
//!   "e.g. this") and after single-letter initials ("J. Smith"). A single
//!   uppercase letter other than "I" counts as an initial only when the next
//!   word is capitalized and is not a common sentence opener, so "J. R.
//!   Tolkien" stays whole while "plan B. The team" and "So did I. Then" split.
//!   Closing quotes and brackets after the terminal mark stay with the
//!   sentence. Newlines are not boundaries.
//! - [`PeriodSegmenter`] replaces newlines with spaces, splits on every `.`,
//!   trims, and drops empty fragments. "3.14" becomes "3" and "14"; "Mr. Smith
//!   arrived." becomes "Mr" and "Smith arrived". Periods are not kept.
//!
//! Both are deterministic and never yield empty sentences.

use serde::{Deserialize, Serialize};

/// Lowercase abbreviations (without the final period) that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "cf", "inc",
    "ltd", "co", "corp", "dept", "est", "approx", "fig", "vol", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k", "a.m", "p.m",
];

/// Marks that can end a sentence.
const TERMINAL_CHARS: &[char] = &['.', '!', '?'];

/// Whether `sentence` already ends in terminal punctuation, ignoring closing
/// quotes and brackets.
pub fn has_terminal_mark(sentence: &str) -> bool {
    sentence
        .trim_end()
        .trim_end_matches(CLOSING_CHARS)
        .ends_with(TERMINAL_CHARS)
}

/// Closing marks that belong to the sentence they follow.
const CLOSING_CHARS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']'];

/// Lowercase words that commonly start a sentence. A single capital letter
/// followed by one of these ends the sentence instead of being an initial.
const SENTENCE_OPENERS: &[&str] = &[
    "a", "after", "also", "an", "and", "as", "at", "before", "but", "for", "he", "her", "his",
    "how", "however", "i", "if", "in", "it", "its", "my", "no", "on", "our", "see", "she", "so",
    "that", "the", "their", "then", "there", "these", "they", "this", "those", "to", "we", "what",
    "when", "who", "why", "yes", "you",
];

/// Opening marks stripped before looking a word up as an abbreviation.
const OPENING_CHARS: &[char] = &['"', '\'', '\u{201C}', '\u{2018}', '(', '['];

/// An ordered sequence of non-empty sentences in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceSequence {
    sentences: Vec<String>,
}

impl SentenceSequence {
    /// Build a sequence, trimming each sentence and dropping blank ones.
    pub fn from_sentences<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            sentences: sentences
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.sentences.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.sentences.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.sentences
    }

    /// Join all sentences with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.sentences.join(separator)
    }
}

impl<'a> IntoIterator for &'a SentenceSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

/// Splits text into sentences.
pub trait SentenceSegmenter {
    fn segment(&self, text: &str) -> SentenceSequence;
}

/// Rule-based segmenter aware of abbreviations, decimals and quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinguisticSegmenter;

impl LinguisticSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Whether the period at byte offset `dot` follows an abbreviation or
    /// initial. `rest` is the text after the candidate boundary.
    fn is_abbreviation(text: &str, dot: usize, rest: &str) -> bool {
        let before = &text[..dot];
        let word_start = before
            .rfind(char::is_whitespace)
            .map(|idx| idx + before[idx..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        let word = before[word_start..].trim_start_matches(OPENING_CHARS);

        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if first.is_uppercase() {
                return first != 'I' && Self::continues_name(rest);
            }
        }

        let lower = word.to_lowercase();
        ABBREVIATIONS.contains(&lower.as_str())
    }

    /// Whether the next word looks like the rest of a name after an initial.
    fn continues_name(rest: &str) -> bool {
        let Some(next) = rest.split_whitespace().next() else {
            return false;
        };
        let next = next.trim_start_matches(OPENING_CHARS);
        if !next.chars().next().is_some_and(char::is_uppercase) {
            return false;
        }
        let bare = next
            .trim_end_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        !SENTENCE_OPENERS.contains(&bare.as_str())
    }
}

impl SentenceSegmenter for LinguisticSegmenter {
    fn segment(&self, text: &str) -> SentenceSequence {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];
            if !TERMINAL_CHARS.contains(&c) {
                i += 1;
                continue;
            }

            let mut j = i;
            while j < chars.len() && TERMINAL_CHARS.contains(&chars[j].1) {
                j += 1;
            }
            let single_period = c == '.' && j - i == 1;
            while j < chars.len() && CLOSING_CHARS.contains(&chars[j].1) {
                j += 1;
            }

            // A boundary needs whitespace or the end of text after it
            if j < chars.len() && !chars[j].1.is_whitespace() {
                i = j;
                continue;
            }
            let end = chars.get(j).map_or(text.len(), |&(idx, _)| idx);
            if single_period && Self::is_abbreviation(text, offset, &text[end..]) {
                i = j;
                continue;
            }

            sentences.push(&text[start..end]);
            start = end;
            i = j;
        }
        sentences.push(&text[start..]);

        SentenceSequence::from_sentences(sentences)
    }
}

/// Splits on every period.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodSegmenter;

impl PeriodSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSegmenter for PeriodSegmenter {
    fn segment(&self, text: &str) -> SentenceSequence {
        SentenceSequence::from_sentences(text.replace('\n', " ").split('.'))
    }
}

/// Selectable segmentation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    /// [`LinguisticSegmenter`].
    #[default]
    Linguistic,
    /// [`PeriodSegmenter`].
    Period,
}

impl SentenceSegmenter for SegmenterKind {
    fn segment(&self, text: &str) -> SentenceSequence {
        match self {
            SegmenterKind::Linguistic => LinguisticSegmenter.segment(text),
            SegmenterKind::Period => PeriodSegmenter.segment(text),
        }
    }
}
