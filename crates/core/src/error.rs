//! Error types for document summarization.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or summarizing a document.
///
/// Extraction failures reported by the upstream extractor and empty input are
/// not errors: the pipeline turns them into a placeholder [`SummaryResult`].
///
/// [`SummaryResult`]: crate::SummaryResult
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// The PDF backend could not produce text.
    #[error("PDF extraction error: {0}")]
    PdfError(String),

    /// The raw document is larger than the configured limit.
    #[error("Document too large: {size} bytes exceeds limit of {limit} bytes")]
    DocumentTooLarge { size: usize, limit: usize },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The external analysis collaborator failed.
    #[error("Document analysis failed: {0}")]
    AnalysisError(String),

    /// External signals could not be parsed.
    #[error("Invalid analysis signals: {0}")]
    SignalsParseError(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SignalsParseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DocumentTooLarge {
            size: 20,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "Document too large: 20 bytes exceeds limit of 10 bytes"
        );

        let err = Error::AnalysisError("service unreachable".to_string());
        assert_eq!(
            err.to_string(),
            "Document analysis failed: service unreachable"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::SignalsParseError(_)));
    }
}
