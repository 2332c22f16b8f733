//! Pipeline configuration.

use crate::error::{Error, Result};
use crate::keypoints::{DEFAULT_ENTITY_SALIENCE, DEFAULT_MAX_POINTS, SIGNAL_MAX_POINTS};
use crate::summarize::SummaryStrategy;
use serde::{Deserialize, Serialize};

/// Raw documents above this many characters get a topic statement.
pub const LONG_DOCUMENT_CHARS: usize = 10_000;

/// Largest raw document accepted, in bytes (16 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

/// Tunables for [`DocumentSummaryPipeline`](crate::DocumentSummaryPipeline).
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Summary strategy when no external signals are available.
    pub heuristic_strategy: SummaryStrategy,

    /// Positional summary length for signal-backed documents.
    pub signal_sentences: usize,

    /// Positional summary length for long signal-backed documents.
    pub long_signal_sentences: usize,

    /// Character count above which a document is long.
    pub long_document_chars: usize,

    /// Key-point limit without signals.
    pub heuristic_max_points: usize,

    /// Key-point limit with signals.
    pub signal_max_points: usize,

    /// Salience an entity must exceed to mark key points.
    pub entity_salience: f64,

    /// Salience an entity must exceed to appear in the topic statement.
    pub topic_salience: f64,

    /// Categories named in the topic statement.
    pub topic_categories: usize,

    /// Entities named in the topic statement when there are no categories.
    pub topic_entities: usize,

    /// Apply NFKC folding during normalization.
    pub fold_unicode: bool,

    /// Largest raw document accepted, in bytes.
    pub max_document_bytes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            heuristic_strategy: SummaryStrategy::default(),
            signal_sentences: 3,
            long_signal_sentences: 5,
            long_document_chars: LONG_DOCUMENT_CHARS,
            heuristic_max_points: DEFAULT_MAX_POINTS,
            signal_max_points: SIGNAL_MAX_POINTS,
            entity_salience: DEFAULT_ENTITY_SALIENCE,
            topic_salience: 0.1,
            topic_categories: 3,
            topic_entities: 5,
            fold_unicode: false,
            max_document_bytes: MAX_DOCUMENT_BYTES,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        match self.heuristic_strategy {
            SummaryStrategy::Budget { max_chars: 0 } => {
                return Err(Error::InvalidConfig(
                    "summary budget must be at least 1 character".to_string(),
                ));
            }
            SummaryStrategy::Positional { sentences: 0 } => {
                return Err(Error::InvalidConfig(
                    "summary must contain at least 1 sentence".to_string(),
                ));
            }
            _ => {}
        }

        if self.signal_sentences == 0 || self.long_signal_sentences == 0 {
            return Err(Error::InvalidConfig(
                "signal summaries must contain at least 1 sentence".to_string(),
            ));
        }
        if self.heuristic_max_points == 0 || self.signal_max_points == 0 {
            return Err(Error::InvalidConfig(
                "key-point limits must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("entity_salience", self.entity_salience),
            ("topic_salience", self.topic_salience),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.max_document_bytes == 0 {
            return Err(Error::InvalidConfig(
                "max_document_bytes must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.heuristic_max_points, 5);
        assert_eq!(config.signal_max_points, 10);
        assert_eq!(config.long_document_chars, 10_000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PipelineConfig::from_json_str(
            r#"{"heuristic_strategy":{"kind":"positional","sentences":4},"fold_unicode":true}"#,
        )
        .unwrap();
        assert_eq!(
            config.heuristic_strategy,
            SummaryStrategy::Positional { sentences: 4 }
        );
        assert!(config.fold_unicode);
        assert_eq!(config.signal_sentences, 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PipelineConfig::from_json_str(r#"{"entity_salience":1.5}"#).unwrap_err();
        assert!(err.to_string().contains("entity_salience"));

        assert!(PipelineConfig::from_json_str(r#"{"heuristic_max_points":0}"#).is_err());
        assert!(PipelineConfig::from_json_str(
            r#"{"heuristic_strategy":{"kind":"budget","max_chars":0}}"#
        )
        .is_err());
        assert!(PipelineConfig::from_json_str("not json").is_err());
    }
}
