//! End-to-end digest of one document.
//!
//! Without external signals the text is segmented linguistically, summarized
//! with the configured heuristic strategy, and key points come from indicator
//! words, paragraph leads and boundary fill. With signals the text is split on
//! periods, summarized by positional sampling (prefixed by a topic statement
//! for long documents), and key points come from indicator words, salient
//! entities and boundary fill.

use crate::analysis::{gather_signals, DocumentAnalyzer};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::keypoints::{KeyPointExtractor, KeyPointTier};
use crate::normalize::TextNormalizer;
use crate::segment::{SegmenterKind, SentenceSegmenter};
use crate::summarize::ExtractiveSummarizer;
use crate::types::{ExternalSignals, RawDocument, SummaryResult};

/// Orchestrates normalization, segmentation, summarization and key-point
/// selection. Holds only read-only configuration, so one instance can serve
/// any number of documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentSummaryPipeline {
    config: PipelineConfig,
}

impl DocumentSummaryPipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with a validated configuration.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Digest `raw`, using `signals` when present and non-empty.
    ///
    /// Empty documents and extraction-failure markers produce the placeholder
    /// result. Fails only if the document exceeds `max_document_bytes`.
    pub fn process(
        &self,
        raw: &RawDocument,
        signals: Option<&ExternalSignals>,
    ) -> Result<SummaryResult> {
        if let Some(placeholder) = self.placeholder_for(raw) {
            return Ok(placeholder);
        }
        self.check_size(raw)?;

        let result = match signals.filter(|s| !s.is_empty()) {
            Some(signals) => self.digest_with_signals(raw, signals),
            None => self.digest_heuristic(raw),
        };
        log::debug!(
            "Produced {}-character summary and {} key points",
            result.summary.chars().count(),
            result.key_points.len()
        );
        Ok(result)
    }

    /// Digest `raw`, asking `analyzer` for signals first.
    ///
    /// Analyzer failures fall back to the heuristic path. The analyzer is not
    /// consulted for documents that get the placeholder.
    pub fn process_with_analyzer(
        &self,
        raw: &RawDocument,
        analyzer: &dyn DocumentAnalyzer,
    ) -> Result<SummaryResult> {
        if let Some(placeholder) = self.placeholder_for(raw) {
            return Ok(placeholder);
        }
        self.check_size(raw)?;

        let signals = gather_signals(analyzer, raw.content());
        self.process(raw, signals.as_ref())
    }

    fn placeholder_for(&self, raw: &RawDocument) -> Option<SummaryResult> {
        if raw.is_blank() {
            log::warn!("Document contains no text");
            return Some(SummaryResult::placeholder());
        }
        if raw.is_extraction_failure() {
            log::warn!("Upstream extraction failed: {}", raw.content());
            return Some(SummaryResult::placeholder());
        }
        None
    }

    fn check_size(&self, raw: &RawDocument) -> Result<()> {
        let size = raw.content().len();
        if size > self.config.max_document_bytes {
            return Err(Error::DocumentTooLarge {
                size,
                limit: self.config.max_document_bytes,
            });
        }
        Ok(())
    }

    fn normalizer(&self) -> TextNormalizer {
        TextNormalizer::new().with_unicode_folding(self.config.fold_unicode)
    }

    fn digest_heuristic(&self, raw: &RawDocument) -> SummaryResult {
        let segmenter = SegmenterKind::Linguistic;
        let text = self.normalizer().normalize(raw.content());
        let sentences = segmenter.segment(text.as_str());
        log::debug!("Heuristic path: {} sentences", sentences.len());

        let summary = ExtractiveSummarizer::new()
            .with_strategy(self.config.heuristic_strategy)
            .summarize(&sentences);
        let key_points = KeyPointExtractor::new()
            .with_tiers(KeyPointTier::cascade(self.config.entity_salience))
            .with_max_points(self.config.heuristic_max_points)
            .with_segmenter(segmenter)
            .extract(&sentences, &text, None);

        SummaryResult::new(summary, key_points)
    }

    fn digest_with_signals(&self, raw: &RawDocument, signals: &ExternalSignals) -> SummaryResult {
        let segmenter = SegmenterKind::Period;
        let text = self.normalizer().normalize(raw.content());
        let sentences = segmenter.segment(text.as_str());
        let long = raw.char_len() > self.config.long_document_chars;
        log::debug!(
            "Signal path: {} sentences, long document: {}",
            sentences.len(),
            long
        );

        let count = if long {
            self.config.long_signal_sentences
        } else {
            self.config.signal_sentences
        };
        let extractive = ExtractiveSummarizer::positional(count).summarize(&sentences);

        let summary = match self.topic_statement(signals).filter(|_| long) {
            Some(topic) if extractive.is_empty() => topic,
            Some(topic) => format!("{} {}", topic, extractive),
            None => extractive,
        };

        let key_points = KeyPointExtractor::new()
            .with_tiers(KeyPointTier::cascade(self.config.entity_salience))
            .with_max_points(self.config.signal_max_points)
            .with_segmenter(segmenter)
            .extract(&sentences, &text, Some(signals));

        SummaryResult::new(summary, key_points)
    }

    /// "This document focuses on ..." naming the leading categories, or the most
    /// salient entities when there are no categories.
    fn topic_statement(&self, signals: &ExternalSignals) -> Option<String> {
        let names: Vec<&str> = if signals.categories.is_empty() {
            signals.top_entities(self.config.topic_salience, self.config.topic_entities)
        } else {
            signals
                .categories
                .iter()
                .take(self.config.topic_categories)
                .map(String::as_str)
                .collect()
        };

        if names.is_empty() {
            return None;
        }
        Some(format!("This document focuses on {}.", names.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExternalEntity;

    #[test]
    fn test_topic_statement_prefers_categories() {
        let pipeline = DocumentSummaryPipeline::new();
        let signals = ExternalSignals::new(
            vec![ExternalEntity::new("Acme", 0.9)],
            vec![
                "Finance".to_string(),
                "Legal".to_string(),
                "Tax".to_string(),
                "Audit".to_string(),
            ],
        );
        assert_eq!(
            pipeline.topic_statement(&signals).as_deref(),
            Some("This document focuses on Finance, Legal, Tax.")
        );
    }

    #[test]
    fn test_topic_statement_falls_back_to_entities() {
        let pipeline = DocumentSummaryPipeline::new();
        let signals = ExternalSignals::new(
            vec![
                ExternalEntity::new("Board", 0.2),
                ExternalEntity::new("Acme", 0.6),
                ExternalEntity::new("footnote", 0.1),
            ],
            Vec::new(),
        );
        assert_eq!(
            pipeline.topic_statement(&signals).as_deref(),
            Some("This document focuses on Acme, Board.")
        );

        let weak = ExternalSignals::new(vec![ExternalEntity::new("x", 0.01)], Vec::new());
        assert_eq!(pipeline.topic_statement(&weak), None);
    }

    #[test]
    fn test_short_document_with_signals_has_no_topic() {
        let pipeline = DocumentSummaryPipeline::new();
        let raw = RawDocument::new("One. Two. Three. Four. Five.");
        let signals = ExternalSignals::new(Vec::new(), vec!["Finance".to_string()]);

        let result = pipeline.process(&raw, Some(&signals)).unwrap();
        assert_eq!(result.summary, "One. Two. Five.");
    }

    #[test]
    fn test_document_too_large() {
        let config = PipelineConfig {
            max_document_bytes: 10,
            ..PipelineConfig::default()
        };
        let pipeline = DocumentSummaryPipeline::with_config(config).unwrap();

        let err = pipeline
            .process(&RawDocument::new("This text is longer than ten bytes."), None)
            .unwrap_err();
        assert!(matches!(err, Error::DocumentTooLarge { limit: 10, .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig {
            signal_max_points: 0,
            ..PipelineConfig::default()
        };
        assert!(DocumentSummaryPipeline::with_config(config).is_err());
    }

    #[test]
    fn test_analyzer_not_called_for_placeholder() {
        let pipeline = DocumentSummaryPipeline::new();
        let analyzer = |_: &str| -> Result<ExternalSignals> {
            panic!("analyzer must not run for failed extractions")
        };

        let result = pipeline
            .process_with_analyzer(&RawDocument::extraction_failure("bad xref"), &analyzer)
            .unwrap();
        assert!(result.is_placeholder());
    }
}
