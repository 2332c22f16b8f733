//! Extractive summaries built from verbatim sentences.
//!
//! Two selection strategies are available: accumulate sentences from the start
//! until a character budget is reached, or sample the first, last and evenly
//! spaced interior sentences.

use crate::segment::{has_terminal_mark, SentenceSequence};
use serde::{Deserialize, Serialize};

/// Default character budget for [`SummaryStrategy::Budget`].
pub const DEFAULT_BUDGET_CHARS: usize = 500;

/// Default sentence count for [`SummaryStrategy::Positional`].
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

/// Appended when a budgeted summary leaves sentences out.
pub const ELLIPSIS: &str = "...";

/// How sentences are chosen for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryStrategy {
    /// Leading sentences up to `max_chars` characters.
    Budget { max_chars: usize },
    /// First, last, and evenly spaced interior sentences, `sentences` in total.
    Positional { sentences: usize },
}

impl Default for SummaryStrategy {
    fn default() -> Self {
        Self::Budget {
            max_chars: DEFAULT_BUDGET_CHARS,
        }
    }
}

/// Builds extractive summaries with a configured strategy.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveSummarizer {
    strategy: SummaryStrategy,
}

impl ExtractiveSummarizer {
    /// Create a summarizer with the default 500-character budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a budgeted summarizer.
    pub fn budgeted(max_chars: usize) -> Self {
        Self::new().with_strategy(SummaryStrategy::Budget { max_chars })
    }

    /// Create a positional-sampling summarizer.
    pub fn positional(sentences: usize) -> Self {
        Self::new().with_strategy(SummaryStrategy::Positional { sentences })
    }

    /// Set the selection strategy.
    ///
    /// Budgets and counts are clamped to at least 1.
    pub fn with_strategy(mut self, strategy: SummaryStrategy) -> Self {
        self.strategy = match strategy {
            SummaryStrategy::Budget { max_chars } => SummaryStrategy::Budget {
                max_chars: max_chars.max(1),
            },
            SummaryStrategy::Positional { sentences } => SummaryStrategy::Positional {
                sentences: sentences.max(1),
            },
        };
        self
    }

    pub fn strategy(&self) -> SummaryStrategy {
        self.strategy
    }

    /// Summarize a sentence sequence. Empty input yields an empty summary.
    pub fn summarize(&self, sentences: &SentenceSequence) -> String {
        match self.strategy {
            SummaryStrategy::Budget { max_chars } => budgeted_summary(sentences, max_chars),
            SummaryStrategy::Positional { sentences: count } => {
                positional_summary(sentences, count)
            }
        }
    }
}

/// Accumulate sentences from the start while they fit in `max_chars`.
///
/// The text is the sentences joined by single spaces. If it is shorter than the
/// budget it is returned unchanged. Otherwise the first sentence is always kept,
/// accumulation stops at the first sentence that would overflow, and
/// [`ELLIPSIS`] marks that sentences were left out.
pub fn budgeted_summary(sentences: &SentenceSequence, max_chars: usize) -> String {
    let Some(first) = sentences.get(0) else {
        return String::new();
    };

    let full = sentences.join(" ");
    if full.chars().count() < max_chars {
        return full;
    }

    let mut summary = first.to_string();
    let mut current = first.chars().count();
    let mut taken = 1;

    for sentence in sentences.iter().skip(1) {
        let len = sentence.chars().count();
        if current + len + 1 > max_chars {
            break;
        }
        summary.push(' ');
        summary.push_str(sentence);
        current += len + 1;
        taken += 1;
    }

    if taken < sentences.len() {
        summary.push_str(ELLIPSIS);
    }
    summary
}

/// Indices picked by positional sampling of `total` sentences down to `count`.
///
/// When `total <= count` every index is returned. Otherwise the first and last
/// sentences are always kept and `count - 2` interior picks are made at
/// `i * stride` for `i` in `1..=count-2`, where
/// `stride = (total - 2) / (count - 1)` with floor division. Picks outside the
/// interior are skipped.
pub fn positional_indices(total: usize, count: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    if total <= count {
        return (0..total).collect();
    }

    let last = total - 1;
    let mut picks = vec![0];

    let interior = count.saturating_sub(2);
    if interior > 0 {
        let stride = (total - 2) / (count - 1);
        for i in 1..=interior {
            let idx = i * stride;
            if idx > 0 && idx < last {
                picks.push(idx);
            }
        }
    }

    if last > 0 {
        picks.push(last);
    }
    picks
}

/// Join the positionally sampled sentences into one paragraph.
///
/// Sentences without terminal punctuation (as the period segmenter yields) get
/// a period, so they read as joined by `". "` with a final `"."`. Sentences
/// that already end in `.`, `!` or `?` are kept verbatim.
pub fn positional_summary(sentences: &SentenceSequence, count: usize) -> String {
    if sentences.is_empty() {
        return String::new();
    }

    let pieces: Vec<String> = positional_indices(sentences.len(), count)
        .into_iter()
        .filter_map(|idx| sentences.get(idx))
        .map(|s| {
            if has_terminal_mark(s) {
                s.to_string()
            } else {
                format!("{}.", s)
            }
        })
        .collect();

    pieces.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(sentences: &[&str]) -> SentenceSequence {
        SentenceSequence::from_sentences(sentences.iter().copied())
    }

    #[test]
    fn test_budget_empty_input() {
        assert_eq!(budgeted_summary(&SentenceSequence::default(), 500), "");
        assert_eq!(ExtractiveSummarizer::new().summarize(&SentenceSequence::default()), "");
    }

    #[test]
    fn test_budget_short_input_unchanged() {
        let sentences = seq(&["Short one.", "Short two."]);
        assert_eq!(budgeted_summary(&sentences, 500), "Short one. Short two.");
    }

    #[test]
    fn test_budget_truncates_with_ellipsis() {
        let sentences = seq(&["alpha beta", "gamma delt", "epsilon ze", "eta theta!"]);
        // 10 + 11 = 21 fits in 25, a third sentence would reach 32
        assert_eq!(budgeted_summary(&sentences, 25), "alpha beta gamma delt...");
    }

    #[test]
    fn test_budget_stops_at_first_overflow() {
        let long = "b".repeat(30);
        let sentences = seq(&["aaaaaaaaaa", long.as_str(), "c"]);
        // "c" would fit but accumulation never skips ahead
        assert_eq!(budgeted_summary(&sentences, 20), "aaaaaaaaaa...");
    }

    #[test]
    fn test_budget_exact_fit_has_no_ellipsis() {
        let sentences = seq(&["abcd", "efgh"]);
        assert_eq!(budgeted_summary(&sentences, 9), "abcd efgh");
    }

    #[test]
    fn test_budget_overlong_first_sentence_kept() {
        let sentences = seq(&["a very long opening sentence", "next"]);
        assert_eq!(
            budgeted_summary(&sentences, 5),
            "a very long opening sentence..."
        );
    }

    #[test]
    fn test_positional_all_sentences_when_few() {
        let sentences = seq(&["One", "Two", "Three"]);
        assert_eq!(positional_summary(&sentences, 3), "One. Two. Three.");

        let punctuated = seq(&["One.", "Two."]);
        assert_eq!(positional_summary(&punctuated, 3), "One. Two.");
    }

    #[test]
    fn test_positional_keeps_existing_punctuation() {
        let sentences = seq(&["Is it done?", "Yes it is.", "Wait...", "Really!"]);
        assert_eq!(
            positional_summary(&sentences, 5),
            "Is it done? Yes it is. Wait... Really!"
        );

        let mixed = seq(&["No mark here", "He said \"Stop.\"", "Tail"]);
        assert_eq!(
            positional_summary(&mixed, 3),
            "No mark here. He said \"Stop.\" Tail."
        );
    }

    #[test]
    fn test_positional_five_sentences_three_picks() {
        // stride = (5 - 2) / (3 - 1) = 1, so the single interior pick is 1 * 1 = 1
        assert_eq!(positional_indices(5, 3), vec![0, 1, 4]);

        let sentences = seq(&["S0", "S1", "S2", "S3", "S4"]);
        assert_eq!(positional_summary(&sentences, 3), "S0. S1. S4.");
    }

    #[test]
    fn test_positional_index_formula() {
        // stride = 8 / 4 = 2
        assert_eq!(positional_indices(10, 5), vec![0, 2, 4, 6, 9]);
        // stride = 5 / 4 = 1
        assert_eq!(positional_indices(7, 5), vec![0, 1, 2, 3, 6]);
        // stride = 10 / 2 = 5
        assert_eq!(positional_indices(12, 3), vec![0, 5, 11]);
        // no interior picks for a count of 2
        assert_eq!(positional_indices(6, 2), vec![0, 5]);
    }

    #[test]
    fn test_positional_degenerate_counts() {
        assert!(positional_indices(0, 3).is_empty());
        assert_eq!(positional_indices(1, 3), vec![0]);
        assert_eq!(positional_indices(4, 1), vec![0, 3]);
        assert_eq!(positional_summary(&SentenceSequence::default(), 3), "");
    }

    #[test]
    fn test_summarizer_strategy_clamped() {
        let summarizer = ExtractiveSummarizer::positional(0);
        assert_eq!(
            summarizer.strategy(),
            SummaryStrategy::Positional { sentences: 1 }
        );

        let summarizer = ExtractiveSummarizer::budgeted(0);
        assert_eq!(summarizer.strategy(), SummaryStrategy::Budget { max_chars: 1 });
    }

    #[test]
    fn test_strategy_serde() {
        let strategy: SummaryStrategy =
            serde_json::from_str(r#"{"kind":"positional","sentences":4}"#).unwrap();
        assert_eq!(strategy, SummaryStrategy::Positional { sentences: 4 });
        assert_eq!(SummaryStrategy::default(), SummaryStrategy::Budget { max_chars: 500 });
    }
}
