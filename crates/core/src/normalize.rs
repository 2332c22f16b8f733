//! Text cleanup for extracted documents.
//!
//! Collapses whitespace runs left behind by PDF extraction and repairs
//! sentences that were wrapped across lines.

use crate::segment::{SegmenterKind, SentenceSegmenter};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Three or more consecutive newlines.
static EXCESS_NEWLINES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Two or more consecutive spaces.
static EXCESS_SPACES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// A space directly before a period.
static SPACE_BEFORE_PERIOD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" \.").unwrap());

/// Text after cleanup, ready for segmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-blank paragraphs separated by a blank line, in document order.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.0
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .collect()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cleans raw extracted text.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    /// Rule used to re-join sentences.
    segmenter: SegmenterKind,

    /// Apply NFKC folding (ligatures, full-width forms) first.
    fold_unicode: bool,
}

impl TextNormalizer {
    /// Create a normalizer using linguistic segmentation and no unicode folding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation rule used when re-joining sentences.
    pub fn with_segmenter(mut self, segmenter: SegmenterKind) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Set whether to apply NFKC folding before cleanup.
    pub fn with_unicode_folding(mut self, fold: bool) -> Self {
        self.fold_unicode = fold;
        self
    }

    /// Normalize raw text.
    ///
    /// - Converts `\r\n` and `\r` to `\n`
    /// - Collapses 3+ newlines to a blank line and 2+ spaces to one
    /// - Re-joins the sentences with single spaces
    /// - Removes spaces before periods
    ///
    /// Blank input yields an empty result.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        if raw.trim().is_empty() {
            return NormalizedText::default();
        }

        let mut text = raw.replace("\r\n", "\n").replace('\r', "\n");
        if self.fold_unicode {
            text = text.nfkc().collect();
        }

        let text = EXCESS_NEWLINES_REGEX.replace_all(&text, "\n\n");
        let text = EXCESS_SPACES_REGEX.replace_all(&text, " ");

        let joined = self.segmenter.segment(&text).join(" ");
        let repaired = SPACE_BEFORE_PERIOD_REGEX.replace_all(&joined, ".");

        NormalizedText(repaired.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input() {
        let normalizer = TextNormalizer::new();

        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("   \n\t").is_empty());
    }

    #[test]
    fn test_collapse_spaces() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize("Hello    world.  Next").as_str(),
            "Hello world. Next"
        );
    }

    #[test]
    fn test_remove_space_before_period() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer
                .normalize("Broken line .\nNext sentence .")
                .as_str(),
            "Broken line. Next sentence."
        );
    }

    #[test]
    fn test_collapse_newlines_inside_sentence() {
        let normalizer = TextNormalizer::new();

        let text = normalizer.normalize("Title\n\n\n\nBody starts here. Then more.");
        assert_eq!(text.as_str(), "Title\n\nBody starts here. Then more.");
        assert_eq!(text.paragraphs(), vec!["Title", "Body starts here. Then more."]);
    }

    #[test]
    fn test_sentence_boundaries_rejoined() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize("A one.\n\n\nB two.").as_str(), "A one. B two.");
        assert_eq!(normalizer.normalize("One.\r\nTwo.").as_str(), "One. Two.");
    }

    #[test]
    fn test_period_segmenter_rejoin() {
        let normalizer = TextNormalizer::new().with_segmenter(SegmenterKind::Period);

        assert_eq!(normalizer.normalize("One. Two.").as_str(), "One Two");
    }

    #[test]
    fn test_unicode_folding() {
        let folded = TextNormalizer::new().with_unicode_folding(true);
        let plain = TextNormalizer::new();

        assert_eq!(folded.normalize("\u{FB01}nal e\u{FB00}ort.").as_str(), "final effort.");
        assert_eq!(
            plain.normalize("\u{FB01}nal.").as_str(),
            "\u{FB01}nal."
        );
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let normalizer = TextNormalizer::new();
        let raw = "Some  text .\n\n\n\nMore   text here. End";

        assert_eq!(normalizer.normalize(raw), normalizer.normalize(raw));
    }
}
