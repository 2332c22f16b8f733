//! Core text cleaning, sentence segmentation, extractive summarization and
//! key-point selection for document digests.

pub mod analysis;
pub mod config;
pub mod error;
pub mod keypoints;
pub mod normalize;
pub mod pipeline;
pub mod segment;
pub mod summarize;
pub mod types;

pub use analysis::{gather_signals, DocumentAnalyzer, StaticAnalyzer};
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use keypoints::{KeyPointExtractor, KeyPointTier};
pub use normalize::{NormalizedText, TextNormalizer};
pub use pipeline::DocumentSummaryPipeline;
pub use segment::{
    LinguisticSegmenter, PeriodSegmenter, SegmenterKind, SentenceSegmenter, SentenceSequence,
};
pub use summarize::{ExtractiveSummarizer, SummaryStrategy};
pub use types::{
    DocumentFormat, ExternalEntity, ExternalSignals, RawDocument, SummaryResult,
    EXTRACTION_ERROR_PREFIX, PLACEHOLDER_SUMMARY,
};
