//! WASM-compatible wrapper for document digests.
//!
//! This crate exposes the summary pipeline to JavaScript for use in
//! Cloudflare Workers.

use digest_core::{DocumentSummaryPipeline, ExternalSignals, RawDocument, SummaryResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Digest returned to JavaScript.
#[derive(Debug, Serialize)]
pub struct DigestResult {
    /// Condensed summary text.
    pub summary: String,
    /// Key points in selection order.
    pub key_points: Vec<String>,
    /// True when extraction failed or the document had no text.
    pub placeholder: bool,
}

impl From<SummaryResult> for DigestResult {
    fn from(result: SummaryResult) -> Self {
        let placeholder = result.is_placeholder();
        Self {
            summary: result.summary,
            key_points: result.key_points,
            placeholder,
        }
    }
}

/// Summarize already-extracted text.
///
/// # Arguments
/// * `text` - The document text
/// * `signals` - Optional `{ entities: [{ name, salience }], categories: [] }`
///   from an analysis service; `null` or `undefined` when unavailable
///
/// # Returns
/// A JavaScript object `{ summary, key_points, placeholder }`, or throws on error.
#[wasm_bindgen]
pub fn summarize_text(text: &str, signals: JsValue) -> Result<JsValue, JsValue> {
    let signals = parse_signals(signals)?;
    let result = summarize_impl(RawDocument::new(text), signals.as_ref()).map_err(js_error)?;
    to_js(&result)
}

/// Extract and summarize a PDF or text file.
///
/// # Arguments
/// * `data` - The raw bytes of the file
/// * `filename` - The original filename (used for format detection)
/// * `signals` - Optional analysis signals, as for [`summarize_text`]
#[wasm_bindgen]
pub fn summarize_document(
    data: &[u8],
    filename: &str,
    signals: JsValue,
) -> Result<JsValue, JsValue> {
    let signals = parse_signals(signals)?;
    let raw = digest_pdf::extract_document(data, filename);
    let result = summarize_impl(raw, signals.as_ref()).map_err(js_error)?;
    to_js(&result)
}

fn summarize_impl(
    raw: RawDocument,
    signals: Option<&ExternalSignals>,
) -> Result<DigestResult, String> {
    DocumentSummaryPipeline::new()
        .process(&raw, signals)
        .map(DigestResult::from)
        .map_err(|e| e.to_string())
}

fn parse_signals(signals: JsValue) -> Result<Option<ExternalSignals>, JsValue> {
    if signals.is_null() || signals.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(signals)
        .map(Some)
        .map_err(|e| js_error(format!("Invalid signals object: {}", e)))
}

fn to_js(result: &DigestResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result)
        .map_err(|e| js_error(format!("Serialization error: {}", e)))
}

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_core::ExternalEntity;

    #[test]
    fn test_summarize_impl_heuristic() {
        let result = summarize_impl(
            RawDocument::new("Opening line. The key finding is here. Closing line."),
            None,
        )
        .unwrap();

        assert!(!result.placeholder);
        assert_eq!(
            result.summary,
            "Opening line. The key finding is here. Closing line."
        );
        assert_eq!(result.key_points[0], "The key finding is here.");
    }

    #[test]
    fn test_summarize_impl_placeholder() {
        let result = summarize_impl(RawDocument::extraction_failure("encrypted"), None).unwrap();
        assert!(result.placeholder);
        assert!(result.key_points.is_empty());
    }

    #[test]
    fn test_summarize_impl_with_signals() {
        let signals = ExternalSignals::new(vec![ExternalEntity::new("Acme", 0.5)], Vec::new());
        let result = summarize_impl(
            RawDocument::new("Intro. Acme grew. Filler. More filler. Outro."),
            Some(&signals),
        )
        .unwrap();

        assert_eq!(result.summary, "Intro. Acme grew. Outro.");
        assert_eq!(result.key_points[0], "Acme grew");
    }
}
