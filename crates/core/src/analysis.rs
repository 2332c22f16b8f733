//! Boundary to the external document-analysis service.
//!
//! The service is optional. Any failure is logged and treated as if no
//! signals were available, so the pipeline falls back to its heuristic tiers.

use crate::error::Result;
use crate::types::ExternalSignals;

/// Produces entity and category signals for a document.
pub trait DocumentAnalyzer {
    fn analyze(&self, text: &str) -> Result<ExternalSignals>;
}

impl<F> DocumentAnalyzer for F
where
    F: Fn(&str) -> Result<ExternalSignals>,
{
    fn analyze(&self, text: &str) -> Result<ExternalSignals> {
        self(text)
    }
}

/// Analyzer returning signals computed ahead of time.
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    signals: ExternalSignals,
}

impl StaticAnalyzer {
    pub fn new(signals: ExternalSignals) -> Self {
        Self { signals }
    }
}

impl DocumentAnalyzer for StaticAnalyzer {
    fn analyze(&self, _text: &str) -> Result<ExternalSignals> {
        Ok(self.signals.clone())
    }
}

/// Ask `analyzer` for signals, degrading failures and empty answers to `None`.
pub fn gather_signals(analyzer: &dyn DocumentAnalyzer, text: &str) -> Option<ExternalSignals> {
    match analyzer.analyze(text) {
        Ok(signals) if signals.is_empty() => {
            log::debug!("Analysis returned no entities or categories");
            None
        }
        Ok(signals) => {
            log::debug!(
                "Analysis returned {} entities and {} categories",
                signals.entities.len(),
                signals.categories.len()
            );
            Some(signals)
        }
        Err(e) => {
            log::warn!("Document analysis unavailable, using heuristics only: {}", e);
            None
        }
    }
}
