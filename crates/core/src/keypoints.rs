//! Key-point selection.
//!
//! Key points are picked by an ordered cascade of tiers. Each tier sees the
//! sentences already chosen and the remaining quota, and proposes candidates
//! in document order. The driver appends unseen candidates until the quota is
//! met or every tier has run.

use crate::normalize::NormalizedText;
use crate::segment::{SegmenterKind, SentenceSegmenter, SentenceSequence};
use crate::types::ExternalSignals;
use serde::{Deserialize, Serialize};

/// Lexical cues marking a sentence as important. Matched as lowercase substrings.
pub const INDICATOR_WORDS: &[&str] = &[
    "important",
    "key",
    "significant",
    "essential",
    "critical",
    "conclusion",
    "therefore",
    "thus",
    "in summary",
    "to summarize",
];

/// Key-point limit when no external signals are available.
pub const DEFAULT_MAX_POINTS: usize = 5;

/// Key-point limit when entity signals drive selection.
pub const SIGNAL_MAX_POINTS: usize = 10;

/// Entities must be strictly more salient than this to mark a key point.
pub const DEFAULT_ENTITY_SALIENCE: f64 = 0.05;

/// Boundary fill only runs while fewer than this many points are selected.
pub const BOUNDARY_FILL_TARGET: usize = 3;

/// One stage of the selection cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum KeyPointTier {
    /// Sentences containing an [`INDICATOR_WORDS`] cue.
    Indicator,
    /// Sentences naming an entity more salient than `min_salience`.
    /// Only runs when signals are supplied.
    Entity { min_salience: f64 },
    /// First sentence of each paragraph. Only runs without signals.
    ParagraphLead,
    /// Sentences from the start and end of the document, while fewer than
    /// `target` points are selected.
    BoundaryFill { target: usize },
}

impl KeyPointTier {
    /// The default cascade: indicator, entity, paragraph lead, boundary fill.
    pub fn cascade(min_salience: f64) -> Vec<KeyPointTier> {
        vec![
            KeyPointTier::Indicator,
            KeyPointTier::Entity { min_salience },
            KeyPointTier::ParagraphLead,
            KeyPointTier::BoundaryFill {
                target: BOUNDARY_FILL_TARGET,
            },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyPointTier::Indicator => "indicator",
            KeyPointTier::Entity { .. } => "entity",
            KeyPointTier::ParagraphLead => "paragraph_lead",
            KeyPointTier::BoundaryFill { .. } => "boundary_fill",
        }
    }

    /// Propose candidates given what is already `selected` and the `remaining` quota.
    fn select(&self, input: &TierInput<'_>, selected: &[String], remaining: usize) -> Vec<String> {
        match *self {
            KeyPointTier::Indicator => indicator_sentences(input.sentences, selected),
            KeyPointTier::Entity { min_salience } => match input.signals {
                Some(signals) => entity_sentences(input.sentences, signals, min_salience, selected),
                None => Vec::new(),
            },
            KeyPointTier::ParagraphLead => match input.signals {
                Some(_) => Vec::new(),
                None => paragraph_leads(input.text, input.segmenter, selected),
            },
            KeyPointTier::BoundaryFill { target } => {
                boundary_fill(input.sentences, selected, remaining, target)
            }
        }
    }
}

/// Everything a tier may look at.
struct TierInput<'a> {
    sentences: &'a SentenceSequence,
    text: &'a NormalizedText,
    signals: Option<&'a ExternalSignals>,
    segmenter: SegmenterKind,
}

/// Runs the tier cascade.
#[derive(Debug, Clone)]
pub struct KeyPointExtractor {
    tiers: Vec<KeyPointTier>,
    max_points: usize,
    segmenter: SegmenterKind,
}

impl Default for KeyPointExtractor {
    fn default() -> Self {
        Self {
            tiers: KeyPointTier::cascade(DEFAULT_ENTITY_SALIENCE),
            max_points: DEFAULT_MAX_POINTS,
            segmenter: SegmenterKind::Linguistic,
        }
    }
}

impl KeyPointExtractor {
    /// Create an extractor with the default cascade and a limit of 5 points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of key points (at least 1).
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points.max(1);
        self
    }

    /// Replace the tier cascade.
    pub fn with_tiers(mut self, tiers: Vec<KeyPointTier>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Set the rule used to find the first sentence of a paragraph.
    pub fn with_segmenter(mut self, segmenter: SegmenterKind) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Select up to `max_points` distinct key points.
    ///
    /// `text` is the normalized text the sentences came from; it is only used
    /// for paragraph leads. Empty input yields no key points.
    pub fn extract(
        &self,
        sentences: &SentenceSequence,
        text: &NormalizedText,
        signals: Option<&ExternalSignals>,
    ) -> Vec<String> {
        let input = TierInput {
            sentences,
            text,
            signals,
            segmenter: self.segmenter,
        };
        let mut selected: Vec<String> = Vec::new();

        for tier in &self.tiers {
            let remaining = self.max_points.saturating_sub(selected.len());
            if remaining == 0 {
                break;
            }

            let before = selected.len();
            for candidate in tier.select(&input, &selected, remaining) {
                if selected.len() >= self.max_points {
                    break;
                }
                if !selected.contains(&candidate) {
                    selected.push(candidate);
                }
            }
            log::debug!(
                "Key-point tier {} added {} sentence(s)",
                tier.name(),
                selected.len() - before
            );
        }

        selected.truncate(self.max_points);
        selected
    }
}

fn indicator_sentences(sentences: &SentenceSequence, selected: &[String]) -> Vec<String> {
    sentences
        .iter()
        .filter(|s| {
            let lower = s.to_lowercase();
            INDICATOR_WORDS.iter().any(|cue| lower.contains(cue))
        })
        .filter(|s| !is_selected(selected, s))
        .map(str::to_string)
        .collect()
}

fn entity_sentences(
    sentences: &SentenceSequence,
    signals: &ExternalSignals,
    min_salience: f64,
    selected: &[String],
) -> Vec<String> {
    let names = signals.salient_names(min_salience);
    if names.is_empty() {
        return Vec::new();
    }

    sentences
        .iter()
        .filter(|s| names.iter().any(|name| s.contains(*name)))
        .filter(|s| !is_selected(selected, s))
        .map(str::to_string)
        .collect()
}

fn paragraph_leads(
    text: &NormalizedText,
    segmenter: SegmenterKind,
    selected: &[String],
) -> Vec<String> {
    text.paragraphs()
        .into_iter()
        .filter_map(|paragraph| segmenter.segment(paragraph).get(0).map(str::to_string))
        .filter(|s| !is_selected(selected, s))
        .collect()
}

/// Head and tail sentences, splitting `remaining` between them (head gets the
/// floor half). Head candidates come before tail candidates.
fn boundary_fill(
    sentences: &SentenceSequence,
    selected: &[String],
    remaining: usize,
    target: usize,
) -> Vec<String> {
    let max_points = selected.len() + remaining;
    if selected.len() >= target.min(max_points) {
        return Vec::new();
    }

    let all = sentences.as_slice();
    let head = remaining / 2;
    let tail = remaining - head;

    let head_part = &all[..head.min(all.len())];
    let tail_part = &all[all.len().saturating_sub(tail)..];

    head_part
        .iter()
        .chain(tail_part)
        .filter(|s| !is_selected(selected, s))
        .cloned()
        .collect()
}

fn is_selected(selected: &[String], sentence: &str) -> bool {
    selected.iter().any(|s| s == sentence)
}
