//! PDF and plain-text extraction backend for document digests.
//!
//! Turns uploaded bytes into a [`RawDocument`](digest_core::RawDocument).
//! Failures become the `"Error extracting text: ..."` marker the summary
//! pipeline recognises.

pub mod extractor;

pub use extractor::{extract_document, extract_file, extract_text, PdfExtractor};
