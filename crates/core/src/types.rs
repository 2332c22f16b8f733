//! Domain types for documents, analysis signals, and summary output.

use serde::{Deserialize, Serialize};

/// Prefix the upstream extractor puts on its output when extraction failed.
pub const EXTRACTION_ERROR_PREFIX: &str = "Error";

/// Summary returned when there is nothing to summarize.
pub const PLACEHOLDER_SUMMARY: &str = "Could not generate summary due to extraction error.";

/// Text produced by the upstream extractor for a single upload.
///
/// The content is either the extracted text (possibly empty) or an error
/// marker starting with [`EXTRACTION_ERROR_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    content: String,
}

impl RawDocument {
    /// Wrap extracted text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Build the marker document the extractor emits when it fails.
    pub fn extraction_failure(reason: impl std::fmt::Display) -> Self {
        Self::new(format!("{} extracting text: {}", EXTRACTION_ERROR_PREFIX, reason))
    }

    /// The raw text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the extractor signalled a failure.
    pub fn is_extraction_failure(&self) -> bool {
        self.content.starts_with(EXTRACTION_ERROR_PREFIX)
    }

    /// Whether there is no text at all (empty or whitespace only).
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

impl From<String> for RawDocument {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

impl From<&str> for RawDocument {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

/// The format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// UTF-8 (or close enough) plain text.
    PlainText,
}

impl DocumentFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    ///
    /// Only PDF has a signature; plain text is recognised by extension.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }
        None
    }

    /// Detect from magic bytes first, then from the filename's extension.
    pub fn detect(bytes: &[u8], filename: &str) -> Option<Self> {
        Self::from_magic(bytes).or_else(|| {
            filename
                .rsplit_once('.')
                .and_then(|(_, ext)| Self::from_extension(ext))
        })
    }
}

/// An entity reported by the external analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalEntity {
    /// Surface form as it appears in the text.
    pub name: String,

    /// Centrality of the entity to the document, in `[0, 1]`.
    pub salience: f64,
}

impl ExternalEntity {
    pub fn new(name: impl Into<String>, salience: f64) -> Self {
        Self {
            name: name.into(),
            salience,
        }
    }
}

/// Output of the external analysis collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalSignals {
    /// Entities in the order the service returned them.
    pub entities: Vec<ExternalEntity>,

    /// Content categories, most relevant first.
    pub categories: Vec<String>,
}

impl ExternalSignals {
    /// Create signals from entities and categories.
    pub fn new(entities: Vec<ExternalEntity>, categories: Vec<String>) -> Self {
        Self {
            entities,
            categories,
        }
    }

    /// Parse signals from their JSON representation.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when the service returned neither entities nor categories.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.categories.is_empty()
    }

    /// Names of entities whose salience exceeds `threshold`, in service order.
    ///
    /// Entities with a blank name are skipped since they would match every
    /// sentence.
    pub fn salient_names(&self, threshold: f64) -> Vec<&str> {
        self.entities
            .iter()
            .filter(|e| e.salience > threshold && !e.name.trim().is_empty())
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Up to `limit` salient entity names, highest salience first.
    ///
    /// Unlike [`salient_names`](Self::salient_names) this does not keep service
    /// order; only ties do.
    pub fn top_entities(&self, threshold: f64, limit: usize) -> Vec<&str> {
        let mut salient: Vec<&ExternalEntity> = self
            .entities
            .iter()
            .filter(|e| e.salience > threshold && !e.name.trim().is_empty())
            .collect();
        salient.sort_by(|a, b| {
            b.salience
                .partial_cmp(&a.salience)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        salient
            .into_iter()
            .take(limit)
            .map(|e| e.name.as_str())
            .collect()
    }
}

/// The digest produced for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Condensed summary text.
    pub summary: String,

    /// Salient sentences in selection order, without duplicates.
    pub key_points: Vec<String>,
}

impl SummaryResult {
    pub fn new(summary: impl Into<String>, key_points: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            key_points,
        }
    }

    /// Result used when extraction failed or produced no text.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_SUMMARY, Vec::new())
    }

    /// Whether this is the placeholder result.
    pub fn is_placeholder(&self) -> bool {
        self.summary == PLACEHOLDER_SUMMARY && self.key_points.is_empty()
    }
}
