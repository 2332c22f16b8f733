//! Text extraction implementation.

use digest_core::{DocumentFormat, Error, RawDocument, Result};
use std::io::Read;
use std::panic;
use std::path::Path;

/// Extracts text from PDF files via `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a PDF read from `reader`.
    pub fn extract<R: Read>(&self, mut reader: R) -> Result<String> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.extract_bytes(&bytes)
    }

    /// Extract text from in-memory PDF bytes.
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        if DocumentFormat::from_magic(bytes) != Some(DocumentFormat::Pdf) {
            return Err(Error::PdfError("missing %PDF header".to_string()));
        }

        // pdf-extract panics on some malformed inputs
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(Error::PdfError(format!("{:?}", e))),
            Err(_) => {
                return Err(Error::PdfError(
                    "PDF backend aborted on malformed content".to_string(),
                ))
            }
        };

        log::debug!("Extracted {} characters of PDF text", text.chars().count());
        Ok(text)
    }
}

/// Extract text from `data`, detecting the format from magic bytes or `filename`.
pub fn extract_text(data: &[u8], filename: &str) -> Result<String> {
    let format = DocumentFormat::detect(data, filename)
        .ok_or_else(|| Error::UnsupportedFormat(filename.to_string()))?;

    match format {
        DocumentFormat::Pdf => {
            log::debug!("Extracting {} as PDF", filename);
            PdfExtractor::new().extract_bytes(data)
        }
        DocumentFormat::PlainText => {
            log::debug!("Reading {} as plain text", filename);
            Ok(String::from_utf8_lossy(data).into_owned())
        }
    }
}

/// Extract a document for the summary pipeline. Never fails: errors are
/// reported through the extraction-failure marker.
pub fn extract_document(data: &[u8], filename: &str) -> RawDocument {
    match extract_text(data, filename) {
        Ok(text) => {
            if text.trim().is_empty() {
                log::warn!(
                    "No text could be extracted from {}; it may be scanned or restricted",
                    filename
                );
            }
            RawDocument::new(text)
        }
        Err(e) => {
            log::error!("Error extracting text from {}: {}", filename, e);
            RawDocument::extraction_failure(e)
        }
    }
}

/// Read and extract the document at `path`.
pub fn extract_file(path: &Path) -> RawDocument {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    match std::fs::read(path) {
        Ok(data) => extract_document(&data, filename),
        Err(e) => {
            log::error!("Failed to read {}: {}", path.display(), e);
            RawDocument::extraction_failure(Error::from(e))
        }
    }
}
